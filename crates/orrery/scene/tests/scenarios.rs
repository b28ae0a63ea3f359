//! End-to-end scene synchronization scenarios against an in-memory store

use async_trait::async_trait;
use orrery_client::{HttpPlanetStore, MemoryPlanetStore, PlanetStore, StoreError, StoreResult};
use orrery_scene::{HeadlessScene, Reconciler, SceneSync, SyncError, SyncOutcome};
use orrery_types::{CreatePlanetRequest, PlanetDraft, PlanetId, PlanetKind, PlanetRecord};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Notify, Semaphore};

/// Memory store with failure injection and an optional gate on `list`
#[derive(Default)]
struct ScriptedStore {
    inner: MemoryPlanetStore,
    fail_list: AtomicBool,
    fail_create: AtomicBool,
    unreachable_create: AtomicBool,
    fail_delete: Mutex<HashSet<PlanetId>>,
    gate: Option<Semaphore>,
    list_entered: Notify,
    list_calls: AtomicUsize,
    lists_in_flight: AtomicUsize,
    max_lists_in_flight: AtomicUsize,
}

impl ScriptedStore {
    fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        }
    }

    fn open_gate(&self, permits: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(permits);
        }
    }
}

#[async_trait]
impl PlanetStore for ScriptedStore {
    async fn list(&self) -> StoreResult<Vec<PlanetRecord>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 500,
                message: "Failed to load planets".into(),
            });
        }
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.lists_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_lists_in_flight.fetch_max(now, Ordering::SeqCst);
        self.list_entered.notify_one();

        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        tokio::task::yield_now().await;

        let result = self.inner.list().await;
        self.lists_in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn create(&self, draft: &PlanetDraft) -> StoreResult<PlanetId> {
        if self.unreachable_create.load(Ordering::SeqCst) {
            // nothing listens on the discard port, so this never gets a response
            let offline =
                HttpPlanetStore::with_timeout("http://127.0.0.1:9", Duration::from_millis(500))?;
            return offline.create(draft).await;
        }
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 503,
                message: "connection refused".into(),
            });
        }
        self.inner.create(draft).await
    }

    async fn delete(&self, id: PlanetId) -> StoreResult<()> {
        if self.fail_delete.lock().unwrap().contains(&id) {
            return Err(StoreError::Api {
                status: 500,
                message: "Failed to delete planet".into(),
            });
        }
        self.inner.delete(id).await
    }
}

fn draft(name: &str, distance: f64) -> PlanetDraft {
    PlanetDraft {
        pseudo: "ada".into(),
        name: name.into(),
        kind: PlanetKind::Gaseous,
        size: 1.0,
        distance,
        temperature: -40.0,
        atmosphere: vec!["h2".into()],
        has_water: false,
    }
}

fn request(name: &str, distance: f64) -> CreatePlanetRequest {
    CreatePlanetRequest::from(&draft(name, distance))
}

fn scene_sync(store: Arc<ScriptedStore>) -> Arc<SceneSync<Arc<ScriptedStore>, HeadlessScene>> {
    Arc::new(SceneSync::new(
        store,
        Reconciler::mount_seeded(HeadlessScene::new(), 11),
    ))
}

async fn custom_ids(sync: &SceneSync<Arc<ScriptedStore>, HeadlessScene>) -> Vec<PlanetId> {
    sync.scene().lock().await.index().custom_ids().collect()
}

#[tokio::test]
async fn test_planet_appears_and_disappears_with_the_store() {
    let store = Arc::new(ScriptedStore::default());
    let sync = scene_sync(store.clone());

    let id = store.create(&draft("Xa", 20.0)).await.unwrap();
    sync.refresh().await.unwrap();
    assert_eq!(custom_ids(&sync).await, vec![id]);

    store.delete(id).await.unwrap();
    sync.refresh().await.unwrap();
    assert!(custom_ids(&sync).await.is_empty());

    let scene = sync.scene();
    let scene = scene.lock().await;
    assert_eq!(scene.index().catalog_len(), 9);
    assert_eq!(scene.backend().attached_count(), 27);
}

#[tokio::test]
async fn test_nearby_replacement_is_a_different_planet() {
    let store = Arc::new(ScriptedStore::default());
    let sync = scene_sync(store.clone());

    let old = store.create(&draft("Xa", 20.0)).await.unwrap();
    sync.refresh().await.unwrap();

    store.delete(old).await.unwrap();
    let new = store.create(&draft("Xb", 20.005)).await.unwrap();
    match sync.refresh().await.unwrap() {
        SyncOutcome::Applied(report) => {
            assert_eq!(report.removed, vec![old]);
            assert_eq!(report.added, vec![new]);
        }
        other => panic!("expected applied refresh, got {other:?}"),
    }
    assert_eq!(custom_ids(&sync).await, vec![new]);
}

#[tokio::test]
async fn test_refused_create_leaves_scene_and_store_alone() {
    let store = Arc::new(ScriptedStore::default());
    let sync = scene_sync(store.clone());
    sync.create(&request("Xa", 20.0)).await.unwrap();

    store.fail_create.store(true, Ordering::SeqCst);
    let mut notices = sync.subscribe();
    let err = sync.create(&request("Yb", 25.0)).await.unwrap_err();

    assert!(matches!(err, SyncError::Store(_)));
    assert_eq!(err.to_string(), "connection refused");
    assert_eq!(custom_ids(&sync).await.len(), 1);
    assert_eq!(store.inner.len().await, 1);
    assert!(matches!(
        notices.recv().await.unwrap(),
        orrery_scene::SyncNotice::Failed(_)
    ));
}

#[tokio::test]
async fn test_transport_failure_on_create_leaves_scene_and_store_alone() {
    let store = Arc::new(ScriptedStore::default());
    let sync = scene_sync(store.clone());
    let kept = sync.create(&request("Xa", 20.0)).await.unwrap();
    let attached = sync.scene().lock().await.backend().attached_count();

    store.unreachable_create.store(true, Ordering::SeqCst);
    let err = sync.create(&request("Yb", 25.0)).await.unwrap_err();

    match &err {
        SyncError::Store(e) => assert!(e.is_transport()),
        other => panic!("expected store failure, got {other:?}"),
    }
    assert_eq!(custom_ids(&sync).await, vec![kept]);
    assert_eq!(store.inner.len().await, 1);
    assert_eq!(sync.scene().lock().await.backend().attached_count(), attached);
}

#[tokio::test]
async fn test_delete_by_id_spares_a_planet_drawn_alongside() {
    let store = Arc::new(ScriptedStore::default());
    let sync = scene_sync(store.clone());

    let first = sync.create(&request("Xa", 20.0)).await.unwrap();
    let second = sync.create(&request("Xb", 20.005)).await.unwrap();
    assert_eq!(custom_ids(&sync).await, vec![first, second]);

    assert!(sync.delete(first).await.unwrap());

    assert_eq!(custom_ids(&sync).await, vec![second]);
    let remaining: Vec<PlanetId> = store.inner.list().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(remaining, vec![second]);

    let scene = sync.scene();
    let scene = scene.lock().await;
    let record = scene.record(second).unwrap();
    assert_eq!(record.distance, 20.005);
    assert_eq!(scene.index().catalog_len(), 9);
    assert_eq!(scene.backend().attached_count(), 30);
}

#[tokio::test]
async fn test_delete_all_with_unreadable_store_is_a_fetch_failure() {
    let store = Arc::new(ScriptedStore::default());
    let sync = scene_sync(store.clone());
    let id = sync.create(&request("Xa", 20.0)).await.unwrap();

    store.fail_list.store(true, Ordering::SeqCst);
    let err = sync.delete_all().await.unwrap_err();

    assert!(matches!(err, SyncError::Fetch(_)));
    assert_eq!(custom_ids(&sync).await, vec![id]);
    assert_eq!(store.inner.len().await, 1);
}

#[tokio::test]
async fn test_partial_delete_all_converges_on_remaining_planets() {
    let store = Arc::new(ScriptedStore::default());
    let sync = scene_sync(store.clone());
    let mut ids = Vec::new();
    for (i, name) in ["A", "B", "C"].into_iter().enumerate() {
        ids.push(sync.create(&request(name, 10.0 + i as f64)).await.unwrap());
    }
    // second in list order (newest first) is the middle one
    let stuck = ids[1];
    store.fail_delete.lock().unwrap().insert(stuck);

    match sync.delete_all().await {
        Err(SyncError::PartialDelete { deleted, failed }) => {
            assert_eq!(deleted.len(), 2);
            assert_eq!(failed.len(), 1);
            assert_eq!(failed[0].0, stuck);
        }
        other => panic!("expected partial delete, got {other:?}"),
    }

    assert_eq!(custom_ids(&sync).await, vec![stuck]);
    assert_eq!(sync.planets().await.len(), 1);
}

#[tokio::test]
async fn test_queued_refreshes_are_coalesced() {
    let store = Arc::new(ScriptedStore::gated());
    let sync = scene_sync(store.clone());

    let first = tokio::spawn({
        let sync = sync.clone();
        async move { sync.refresh().await }
    });
    store.list_entered.notified().await;

    let queued: Vec<_> = (0..2)
        .map(|_| {
            let sync = sync.clone();
            tokio::spawn(async move { sync.refresh().await })
        })
        .collect();
    tokio::time::sleep(Duration::from_millis(50)).await;
    store.open_gate(10);

    assert!(matches!(
        first.await.unwrap().unwrap(),
        SyncOutcome::Applied(_)
    ));
    let mut applied = 0;
    let mut coalesced = 0;
    for handle in queued {
        match handle.await.unwrap().unwrap() {
            SyncOutcome::Applied(_) => applied += 1,
            SyncOutcome::Coalesced => coalesced += 1,
        }
    }

    // the fetch already running when they queued cannot serve them
    assert_eq!(applied, 1);
    assert_eq!(coalesced, 1);
    assert_eq!(store.list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_at_most_one_fetch_in_flight() {
    let store = Arc::new(ScriptedStore::default());
    let sync = scene_sync(store.clone());

    let mut handles = Vec::new();
    for i in 0..8 {
        let sync = sync.clone();
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                sync.refresh().await.map(|_| ())
            } else {
                sync.create(&request("P", 12.0 + i as f64)).await.map(|_| ())
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.max_lists_in_flight.load(Ordering::SeqCst), 1);

    // a final refresh sees every created planet exactly once
    sync.refresh().await.unwrap();
    assert_eq!(custom_ids(&sync).await.len(), 4);
    let scene = sync.scene();
    let scene = scene.lock().await;
    assert!(scene.backend().group_sizes().values().all(|&n| n == 3));
}
