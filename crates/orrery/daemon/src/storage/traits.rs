//! Storage trait definitions

use crate::error::StorageError;
use async_trait::async_trait;
use orrery_types::{PlanetDraft, PlanetId, PlanetRecord};

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage for custom planets
#[async_trait]
pub trait PlanetStorage: Send + Sync {
    /// Store a validated planet, assigning its id and creation time
    async fn insert(&self, draft: PlanetDraft) -> StorageResult<PlanetRecord>;

    /// List all planets, newest first (ties broken by id, descending)
    async fn list(&self) -> StorageResult<Vec<PlanetRecord>>;

    /// Get a planet by ID
    async fn get(&self, id: PlanetId) -> StorageResult<Option<PlanetRecord>>;

    /// Delete a planet by ID; `false` when it did not exist
    async fn delete(&self, id: PlanetId) -> StorageResult<bool>;
}
