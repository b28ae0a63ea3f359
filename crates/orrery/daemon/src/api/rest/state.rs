//! Application state for API handlers

use crate::imagery::ImageryClient;
use crate::storage::PlanetStorage;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Storage backend
    pub storage: Arc<dyn PlanetStorage>,

    /// Imagery proxy client
    pub imagery: Arc<ImageryClient>,

    /// Name of the storage backend in use
    pub storage_backend: &'static str,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        storage: Arc<dyn PlanetStorage>,
        imagery: Arc<ImageryClient>,
        storage_backend: &'static str,
    ) -> Self {
        Self {
            storage,
            imagery,
            storage_backend,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Get uptime as a human-readable string
    pub fn uptime(&self) -> String {
        let secs = (chrono::Utc::now() - self.started_at).num_seconds();

        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else if secs < 86400 {
            format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
        } else {
            format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
        }
    }
}
