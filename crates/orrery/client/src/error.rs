//! Store client error types

use orrery_types::{PlanetId, ValidationError};
use thiserror::Error;

/// Entity store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network-level failure (connect, timeout, broken body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the payload's `error` field when present
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message to show the user
        message: String,
    },

    /// Response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Draft rejected before submission
    #[error("Invalid planet: {0}")]
    Validation(#[from] ValidationError),

    /// Some deletions of a delete-all sequence failed
    #[error("Deleted {} planet(s), {} failed", deleted.len(), failed.len())]
    PartialDelete {
        /// Ids confirmed deleted
        deleted: Vec<PlanetId>,
        /// Ids whose deletion failed, with the failure message
        failed: Vec<(PlanetId, String)>,
    },
}

impl StoreError {
    /// Whether the failure happened below HTTP (no response was received)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// HTTP status of an API failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
