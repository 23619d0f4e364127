pub mod error;
pub mod publication_repo;
