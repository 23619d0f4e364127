/*
 * Responsibility
 * - Request extractors shared by handlers
 * - Every rejection is an AppError so it goes through the same error body
 */
pub mod identity;
pub mod publication_id;
pub mod validated_json;

pub use identity::{Identity, IdentityExtractor};
pub use publication_id::PublicationId;
pub use validated_json::ValidatedJson;
