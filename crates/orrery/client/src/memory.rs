//! In-memory entity store

use crate::error::StoreResult;
use crate::store::PlanetStore;
use async_trait::async_trait;
use orrery_types::{PlanetDraft, PlanetId, PlanetRecord};
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

/// Process-local store for offline use and testing
///
/// Ids are assigned from a monotonically increasing counter and are never
/// reused, even after deletion.
#[derive(Debug)]
pub struct MemoryPlanetStore {
    planets: RwLock<Vec<PlanetRecord>>,
    next_id: AtomicI64,
}

impl Default for MemoryPlanetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPlanetStore {
    pub fn new() -> Self {
        Self {
            planets: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored planets
    pub async fn len(&self) -> usize {
        self.planets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.planets.read().await.is_empty()
    }
}

#[async_trait]
impl PlanetStore for MemoryPlanetStore {
    async fn list(&self) -> StoreResult<Vec<PlanetRecord>> {
        let planets = self.planets.read().await;
        let mut snapshot = planets.clone();
        snapshot.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(snapshot)
    }

    async fn create(&self, draft: &PlanetDraft) -> StoreResult<PlanetId> {
        let id = PlanetId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = draft.clone().into_record(id, chrono::Utc::now());

        let mut planets = self.planets.write().await;
        planets.push(record);
        Ok(id)
    }

    async fn delete(&self, id: PlanetId) -> StoreResult<()> {
        let mut planets = self.planets.write().await;
        planets.retain(|planet| planet.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_types::PlanetKind;

    fn draft(name: &str, distance: f64) -> PlanetDraft {
        PlanetDraft {
            pseudo: "ada".into(),
            name: name.into(),
            kind: PlanetKind::Gaseous,
            size: 1.0,
            distance,
            temperature: -50.0,
            atmosphere: vec![],
            has_water: false,
        }
    }

    #[tokio::test]
    async fn test_planet_crud() {
        let store = MemoryPlanetStore::new();

        let first = store.create(&draft("Xa", 20.0)).await.unwrap();
        let second = store.create(&draft("Yb", 25.0)).await.unwrap();
        assert_ne!(first, second);

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        // newest first
        assert_eq!(listed[0].id, second);

        store.delete(first).await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let store = MemoryPlanetStore::new();
        let first = store.create(&draft("Xa", 20.0)).await.unwrap();
        store.delete(first).await.unwrap();
        let second = store.create(&draft("Xa", 20.0)).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_delete_all_empties_store() {
        let store = MemoryPlanetStore::new();
        for i in 0..3 {
            store.create(&draft("P", 10.0 + i as f64)).await.unwrap();
        }

        let deleted = store.delete_all().await.unwrap();
        assert_eq!(deleted.len(), 3);
        assert!(store.is_empty().await);
    }
}
