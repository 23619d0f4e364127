/*
 * Responsibility
 * - Meaning the repo reports to upper layers
 */
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    #[error("publication {id} not found")]
    NotFound { id: i64 },
}
