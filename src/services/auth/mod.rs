pub mod policy;
pub mod token;

pub use policy::Operation;
