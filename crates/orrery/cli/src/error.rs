//! CLI error types

use orrery_client::StoreError;
use orrery_scene::SyncError;
use orrery_types::ValidationError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Store request failed; the daemon's message is shown as is
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Scene synchronization failed
    #[error("{0}")]
    Sync(#[from] SyncError),

    /// Planet refused before sending
    #[error("Invalid planet: {0}")]
    Validation(#[from] ValidationError),

    /// Operation finished only in part
    #[error("{0}")]
    Incomplete(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
