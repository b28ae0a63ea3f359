//! Store-to-scene synchronization
//!
//! Every store round-trip that ends in a reconcile goes through one flight
//! lock, so two snapshots can never be applied out of order. Refresh
//! requests that queue up behind a running fetch are coalesced: a queued
//! request is satisfied once a fetch that *started after it was made* has
//! been applied.

use crate::error::{SyncError, SyncResult};
use crate::reconcile::{ReconcileReport, Reconciler};
use crate::visual::SceneGraph;
use orrery_client::{PlanetStore, StoreError};
use orrery_types::{CreatePlanetRequest, PlanetId, PlanetRecord};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, MutexGuard, RwLock};

const NOTICE_CAPACITY: usize = 64;

/// Change notifications for list views and status lines
#[derive(Debug, Clone, PartialEq)]
pub enum SyncNotice {
    Reconciled(ReconcileReport),
    Created(PlanetId),
    Deleted(PlanetId),
    Cleared { deleted: usize },
    /// A user-visible failure message
    Failed(String),
}

/// Result of a refresh request
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// A fresh snapshot was fetched and applied
    Applied(ReconcileReport),
    /// A newer fetch already covered this request
    Coalesced,
}

/// Drives a [`Reconciler`] from a [`PlanetStore`]
pub struct SceneSync<S, B: SceneGraph> {
    store: S,
    scene: Arc<Mutex<Reconciler<B>>>,
    planets: RwLock<Vec<PlanetRecord>>,
    flight: Mutex<()>,
    fetches_started: AtomicU64,
    last_applied: AtomicU64,
    notices: broadcast::Sender<SyncNotice>,
}

impl<S: PlanetStore, B: SceneGraph> SceneSync<S, B> {
    pub fn new(store: S, reconciler: Reconciler<B>) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Self {
            store,
            scene: Arc::new(Mutex::new(reconciler)),
            planets: RwLock::new(Vec::new()),
            flight: Mutex::new(()),
            fetches_started: AtomicU64::new(0),
            last_applied: AtomicU64::new(0),
            notices,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncNotice> {
        self.notices.subscribe()
    }

    /// Shared scene, for the frame loop and the info panel
    pub fn scene(&self) -> Arc<Mutex<Reconciler<B>>> {
        self.scene.clone()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Last applied snapshot, newest first
    pub async fn planets(&self) -> Vec<PlanetRecord> {
        self.planets.read().await.clone()
    }

    /// Fetch the store and reconcile, unless a newer fetch covers this request
    pub async fn refresh(&self) -> SyncResult<SyncOutcome> {
        let ticket = self.fetches_started.load(Ordering::SeqCst);
        let flight = self.flight.lock().await;

        if self.last_applied.load(Ordering::SeqCst) > ticket {
            tracing::debug!(ticket, "Refresh coalesced");
            return Ok(SyncOutcome::Coalesced);
        }

        self.fetch_and_apply(&flight).await.map(SyncOutcome::Applied)
    }

    /// Validate and submit a new planet, then re-sync.
    ///
    /// Nothing is sent when validation fails. When the store refuses the
    /// planet or cannot be reached, the scene is left untouched.
    pub async fn create(&self, request: &CreatePlanetRequest) -> SyncResult<PlanetId> {
        let draft = request.validate().map_err(|e| self.fail(e.into()))?;

        let flight = self.flight.lock().await;
        let id = self
            .store
            .create(&draft)
            .await
            .map_err(|e| self.fail(SyncError::Store(e)))?;

        tracing::info!(planet_id = %id, name = %draft.name, "Planet created");
        self.notify(SyncNotice::Created(id));

        // the planet exists; a failed re-list only delays its appearance
        let _ = self.fetch_and_apply(&flight).await;
        Ok(id)
    }

    /// Delete one planet and drop its visual.
    ///
    /// Returns whether a visual was removed.
    pub async fn delete(&self, id: PlanetId) -> SyncResult<bool> {
        let flight = self.flight.lock().await;
        self.store
            .delete(id)
            .await
            .map_err(|e| self.fail(SyncError::Store(e)))?;

        let removed = self.scene.lock().await.remove(id);
        self.planets.write().await.retain(|planet| planet.id != id);
        tracing::info!(planet_id = %id, "Planet deleted");
        self.notify(SyncNotice::Deleted(id));

        let _ = self.fetch_and_apply(&flight).await;
        Ok(removed)
    }

    /// Delete every custom planet.
    ///
    /// The scene is cleared only when every deletion succeeded. On partial
    /// failure the store is listed again and the scene converges to
    /// whatever is really left.
    pub async fn delete_all(&self) -> SyncResult<Vec<PlanetId>> {
        let flight = self.flight.lock().await;

        match self.store.delete_all().await {
            Ok(deleted) => {
                self.scene.lock().await.clear_custom();
                self.planets.write().await.clear();
                tracing::info!(deleted = deleted.len(), "All custom planets deleted");
                self.notify(SyncNotice::Cleared {
                    deleted: deleted.len(),
                });
                Ok(deleted)
            }
            Err(StoreError::PartialDelete { deleted, failed }) => {
                let _ = self.fetch_and_apply(&flight).await;
                Err(self.fail(SyncError::PartialDelete { deleted, failed }))
            }
            // nothing was deleted: the listing that starts the sequence failed
            Err(e) => Err(self.fail(SyncError::Fetch(e))),
        }
    }

    /// Fetch and reconcile; the caller must hold the flight lock
    async fn fetch_and_apply(&self, _flight: &MutexGuard<'_, ()>) -> SyncResult<ReconcileReport> {
        let fetch = self.fetches_started.fetch_add(1, Ordering::SeqCst) + 1;

        let snapshot = self
            .store
            .list()
            .await
            .map_err(|e| self.fail(SyncError::Fetch(e)))?;

        let report = self.scene.lock().await.reconcile(&snapshot);
        *self.planets.write().await = snapshot;
        self.last_applied.store(fetch, Ordering::SeqCst);

        tracing::debug!(fetch, added = report.added.len(), removed = report.removed.len(), "Snapshot applied");
        self.notify(SyncNotice::Reconciled(report.clone()));
        Ok(report)
    }

    fn fail(&self, error: SyncError) -> SyncError {
        tracing::warn!(error = %error, "Scene sync failed");
        self.notify(SyncNotice::Failed(error.to_string()));
        error
    }

    fn notify(&self, notice: SyncNotice) {
        // no subscribers is fine
        let _ = self.notices.send(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessScene;
    use orrery_client::MemoryPlanetStore;

    fn request(name: &str, distance: f64) -> CreatePlanetRequest {
        CreatePlanetRequest {
            pseudo: Some("ada".into()),
            planet_name: Some(name.into()),
            kind: Some("rocky".into()),
            size: Some(1.0),
            distance: Some(distance),
            temperature: Some(0.0),
            atmosphere: vec![],
            has_water: false,
        }
    }

    fn sync() -> SceneSync<Arc<MemoryPlanetStore>, HeadlessScene> {
        SceneSync::new(
            Arc::new(MemoryPlanetStore::new()),
            Reconciler::mount_seeded(HeadlessScene::new(), 1),
        )
    }

    #[tokio::test]
    async fn test_create_shows_planet() {
        let sync = sync();
        let mut notices = sync.subscribe();

        let id = sync.create(&request("Xa", 20.0)).await.unwrap();

        let scene = sync.scene();
        assert!(scene.lock().await.index().contains(id));
        assert_eq!(sync.planets().await.len(), 1);
        assert_eq!(notices.recv().await.unwrap(), SyncNotice::Created(id));
    }

    #[tokio::test]
    async fn test_invalid_request_is_never_sent() {
        let sync = sync();
        let err = sync.create(&request("", 20.0)).await.unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));
        assert!(sync.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_removes_visual() {
        let sync = sync();
        let id = sync.create(&request("Xa", 20.0)).await.unwrap();

        assert!(sync.delete(id).await.unwrap());
        assert!(!sync.scene().lock().await.index().contains(id));
        assert!(sync.planets().await.is_empty());

        // deleting again is harmless
        assert!(!sync.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_refresh_picks_up_external_changes() {
        let sync = sync();
        let draft = request("Yb", 30.0).validate().unwrap();
        let id = sync.store().create(&draft).await.unwrap();

        match sync.refresh().await.unwrap() {
            SyncOutcome::Applied(report) => assert_eq!(report.added, vec![id]),
            other => panic!("expected applied refresh, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_all_clears_custom_only() {
        let sync = sync();
        for i in 0..3 {
            sync.create(&request("P", 10.0 + i as f64)).await.unwrap();
        }

        let deleted = sync.delete_all().await.unwrap();
        assert_eq!(deleted.len(), 3);

        let scene = sync.scene();
        let scene = scene.lock().await;
        assert_eq!(scene.index().custom_len(), 0);
        assert_eq!(scene.index().catalog_len(), 9);
    }
}
