//! Background refresh loop

use crate::sync::SceneSync;
use crate::visual::SceneGraph;
use orrery_client::PlanetStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Refresh loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Seconds between periodic refreshes
    pub refresh_interval_secs: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 30,
        }
    }
}

/// Keeps a [`SceneSync`] fresh on a timer and on demand
pub struct SyncDriver<S, B: SceneGraph> {
    config: DriverConfig,
    sync: Arc<SceneSync<S, B>>,
    refresh_tx: mpsc::Sender<()>,
    running: Arc<RwLock<bool>>,
}

impl<S, B> SyncDriver<S, B>
where
    S: PlanetStore + 'static,
    B: SceneGraph + Send + 'static,
    B::Object: Send,
{
    pub fn new(
        config: DriverConfig,
        sync: Arc<SceneSync<S, B>>,
    ) -> (Arc<Self>, mpsc::Receiver<()>) {
        let (refresh_tx, refresh_rx) = mpsc::channel(10);

        let driver = Arc::new(Self {
            config,
            sync,
            refresh_tx,
            running: Arc::new(RwLock::new(false)),
        });

        (driver, refresh_rx)
    }

    /// Request a refresh as soon as possible
    pub async fn trigger_refresh(&self) {
        // a full channel already holds a pending refresh
        let _ = self.refresh_tx.try_send(());
    }

    /// Run until [`stop`](Self::stop) is called; the flag is checked after each refresh
    pub async fn start(self: Arc<Self>, mut refresh_rx: mpsc::Receiver<()>) {
        {
            let mut running = self.running.write().await;
            *running = true;
        }

        tracing::info!(
            interval_secs = self.config.refresh_interval_secs,
            "Sync driver started"
        );

        let mut ticker = interval(Duration::from_secs(self.config.refresh_interval_secs.max(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.sync.refresh().await {
                        tracing::error!(error = %e, "Periodic refresh failed");
                    }
                }
                Some(_) = refresh_rx.recv() => {
                    // drain queued triggers, one refresh serves them all
                    while refresh_rx.try_recv().is_ok() {}
                    if let Err(e) = self.sync.refresh().await {
                        tracing::error!(error = %e, "Triggered refresh failed");
                    }
                }
            }

            let running = self.running.read().await;
            if !*running {
                break;
            }
        }

        tracing::info!("Sync driver stopped");
    }

    /// Stop after the current iteration
    pub async fn stop(&self) {
        let mut running = self.running.write().await;
        *running = false;
    }

    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessScene;
    use crate::reconcile::Reconciler;
    use orrery_client::MemoryPlanetStore;
    use orrery_types::{PlanetDraft, PlanetKind};

    #[tokio::test]
    async fn test_trigger_applies_store_changes() {
        let store = Arc::new(MemoryPlanetStore::new());
        let sync = Arc::new(SceneSync::new(
            store.clone(),
            Reconciler::mount_seeded(HeadlessScene::new(), 3),
        ));
        let config = DriverConfig {
            refresh_interval_secs: 3600,
        };
        let (driver, rx) = SyncDriver::new(config, sync.clone());
        let handle = tokio::spawn(driver.clone().start(rx));

        let id = store
            .create(&PlanetDraft {
                pseudo: "ada".into(),
                name: "Xa".into(),
                kind: PlanetKind::Rocky,
                size: 1.0,
                distance: 20.0,
                temperature: 0.0,
                atmosphere: vec![],
                has_water: false,
            })
            .await
            .unwrap();

        let mut notices = sync.subscribe();
        driver.trigger_refresh().await;

        let applied = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if sync.scene().lock().await.index().contains(id) {
                    break;
                }
                let _ = notices.recv().await;
            }
        })
        .await;
        assert!(applied.is_ok());

        driver.stop().await;
        driver.trigger_refresh().await;
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        assert!(!driver.is_running().await);
    }
}
