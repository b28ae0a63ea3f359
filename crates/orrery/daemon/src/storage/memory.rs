//! In-memory storage implementation

use super::traits::*;
use async_trait::async_trait;
use orrery_types::{PlanetDraft, PlanetId, PlanetRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage for development and testing
#[derive(Debug)]
pub struct InMemoryStorage {
    planets: Arc<RwLock<HashMap<PlanetId, PlanetRecord>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            planets: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

#[async_trait]
impl PlanetStorage for InMemoryStorage {
    async fn insert(&self, draft: PlanetDraft) -> StorageResult<PlanetRecord> {
        let id = PlanetId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = draft.into_record(id, chrono::Utc::now());

        let mut planets = self.planets.write().await;
        planets.insert(id, record.clone());
        Ok(record)
    }

    async fn list(&self) -> StorageResult<Vec<PlanetRecord>> {
        let planets = self.planets.read().await;
        let mut records: Vec<_> = planets.values().cloned().collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    async fn get(&self, id: PlanetId) -> StorageResult<Option<PlanetRecord>> {
        let planets = self.planets.read().await;
        Ok(planets.get(&id).cloned())
    }

    async fn delete(&self, id: PlanetId) -> StorageResult<bool> {
        let mut planets = self.planets.write().await;
        Ok(planets.remove(&id).is_some())
    }
}
