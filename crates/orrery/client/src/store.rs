//! Entity store contract

use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use orrery_types::{PlanetDraft, PlanetId, PlanetRecord};
use std::sync::Arc;

/// Client view of the authoritative custom planet collection
#[async_trait]
pub trait PlanetStore: Send + Sync {
    /// All custom planets, newest first
    async fn list(&self) -> StoreResult<Vec<PlanetRecord>>;

    /// Store a new planet and return the id assigned by the store
    async fn create(&self, draft: &PlanetDraft) -> StoreResult<PlanetId>;

    /// Delete one planet
    async fn delete(&self, id: PlanetId) -> StoreResult<()>;

    /// Delete every planet currently listed.
    ///
    /// There is no bulk primitive: each id is deleted individually and every
    /// id is attempted even after a failure. When any deletion fails the
    /// result is [`StoreError::PartialDelete`] and callers must `list()`
    /// again to learn the true state.
    async fn delete_all(&self) -> StoreResult<Vec<PlanetId>> {
        let planets = self.list().await?;
        let mut deleted = Vec::with_capacity(planets.len());
        let mut failed = Vec::new();

        for planet in planets {
            match self.delete(planet.id).await {
                Ok(()) => deleted.push(planet.id),
                Err(e) => {
                    tracing::warn!(planet_id = %planet.id, error = %e, "Failed to delete planet");
                    failed.push((planet.id, e.to_string()));
                }
            }
        }

        if failed.is_empty() {
            Ok(deleted)
        } else {
            Err(StoreError::PartialDelete { deleted, failed })
        }
    }
}

#[async_trait]
impl<S: PlanetStore + ?Sized> PlanetStore for Arc<S> {
    async fn list(&self) -> StoreResult<Vec<PlanetRecord>> {
        (**self).list().await
    }

    async fn create(&self, draft: &PlanetDraft) -> StoreResult<PlanetId> {
        (**self).create(draft).await
    }

    async fn delete(&self, id: PlanetId) -> StoreResult<()> {
        (**self).delete(id).await
    }

    async fn delete_all(&self) -> StoreResult<Vec<PlanetId>> {
        (**self).delete_all().await
    }
}
