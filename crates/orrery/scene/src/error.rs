//! Scene synchronization errors

use orrery_client::StoreError;
use orrery_types::{PlanetId, ValidationError};
use thiserror::Error;

/// Errors surfaced by [`SceneSync`](crate::SceneSync)
#[derive(Debug, Error)]
pub enum SyncError {
    /// The draft was refused before anything was sent
    #[error("Invalid planet: {0}")]
    Validation(#[from] ValidationError),

    /// Listing the store failed; the scene was left as it was
    #[error("Could not load custom planets: {0}")]
    Fetch(#[source] StoreError),

    /// A create or delete was refused or never reached the store
    #[error("{0}")]
    Store(#[source] StoreError),

    /// Some deletions of a delete-all failed; the scene was re-synced
    #[error("Deleted {} planet(s), {} could not be deleted", deleted.len(), failed.len())]
    PartialDelete {
        deleted: Vec<PlanetId>,
        failed: Vec<(PlanetId, String)>,
    },
}

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;
