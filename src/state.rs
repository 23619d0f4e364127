/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Clone is cheap (Arc inside)
 * - The publication store is owned here for the process lifetime
 */
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::AppError;
use crate::repos::publication_repo::PublicationStore;

#[derive(Clone, Debug, Default)]
pub struct AppState {
    publications: Arc<Mutex<PublicationStore>>,
}

impl AppState {
    pub fn new(store: PublicationStore) -> Self {
        Self {
            publications: Arc::new(Mutex::new(store)),
        }
    }

    /// Locks the store for one operation. Do not hold the guard across an `.await`.
    pub fn publications(&self) -> Result<MutexGuard<'_, PublicationStore>, AppError> {
        self.publications
            .lock()
            .map_err(|_| AppError::internal(anyhow::anyhow!("publication store lock poisoned")))
    }
}
