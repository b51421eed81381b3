//! Periodic and on-demand snapshot refresh
//!
//! Runs are strictly sequential. On-demand requests that arrive while a run
//! is in flight coalesce into a single follow-up run.

use crate::services::{Snapshot, SnapshotService};
use crate::store::SnapshotStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

/// Requests an out-of-schedule refresh
#[derive(Clone)]
pub struct RefreshHandle {
    trigger: Arc<Notify>,
}

impl RefreshHandle {
    pub fn request(&self) {
        self.trigger.notify_one();
    }
}

/// Drives the snapshot pipeline and publishes its results
pub struct RefreshScheduler {
    service: Arc<SnapshotService>,
    store: Arc<SnapshotStore>,
    interval: Duration,
    trigger: Arc<Notify>,
}

impl RefreshScheduler {
    pub fn new(service: Arc<SnapshotService>, store: Arc<SnapshotStore>, interval: Duration) -> Self {
        Self {
            service,
            store,
            interval,
            trigger: Arc::new(Notify::new()),
        }
    }

    pub fn handle(&self) -> RefreshHandle {
        RefreshHandle {
            trigger: self.trigger.clone(),
        }
    }

    /// Spawn the refresh loop; the first run starts immediately
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    async fn run(self) {
        info!(
            "⏰ Refresh scheduler started (interval: {}s)",
            self.interval.as_secs()
        );

        let mut timer = interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let reason = tokio::select! {
                _ = timer.tick() => "scheduled",
                _ = self.trigger.notified() => "on-demand",
            };

            info!("🕐 Starting {} refresh", reason);
            self.refresh_once().await;
        }
    }

    /// Run the pipeline once and publish the result.
    ///
    /// A failed publish is logged; the previously published snapshot stays
    /// current.
    pub async fn refresh_once(&self) -> Option<Arc<Snapshot>> {
        let snapshot = self.service.run_once().await;

        // File I/O stays off the runtime workers
        let store = self.store.clone();
        match tokio::task::spawn_blocking(move || store.publish(snapshot)).await {
            Ok(Ok(published)) => {
                info!(
                    "✅ Snapshot published ({}, overall {})",
                    published.last_update, published.overall_status
                );
                Some(published)
            }
            Ok(Err(e)) => {
                error!("❌ Failed to publish snapshot: {}", e);
                None
            }
            Err(e) => {
                error!("❌ Publish task failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing_support::full_transport;
    use crate::sources::testing::client_with;
    use tempfile::tempdir;

    fn scheduler(store: Arc<SnapshotStore>, every: Duration) -> RefreshScheduler {
        let service = Arc::new(SnapshotService::new(client_with(full_transport())));
        RefreshScheduler::new(service, store, every)
    }

    #[tokio::test]
    async fn test_refresh_once_publishes() {
        let dir = tempdir().unwrap();
        let store = Arc::new(SnapshotStore::open(dir.path().join("snapshot.json")));
        let scheduler = scheduler(store.clone(), Duration::from_secs(180));

        let published = scheduler.refresh_once().await.unwrap();
        assert_eq!(store.current(), Some(published));
        assert!(dir.path().join("snapshot.json").exists());
    }

    /// Wait until the store holds a snapshot other than `previous`
    async fn next_published(store: &SnapshotStore, previous: Option<&Arc<Snapshot>>) -> Arc<Snapshot> {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if let Some(current) = store.current() {
                    if previous.map_or(true, |p| !Arc::ptr_eq(p, &current)) {
                        return current;
                    }
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("snapshot published in time")
    }

    #[tokio::test]
    async fn test_loop_runs_immediately_and_on_demand() {
        let dir = tempdir().unwrap();
        let store = Arc::new(SnapshotStore::open(dir.path().join("snapshot.json")));
        let scheduler = scheduler(store.clone(), Duration::from_secs(3600));
        let handle = scheduler.handle();
        let task = scheduler.start();

        let first = next_published(&store, None).await;

        handle.request();
        let second = next_published(&store, Some(&first)).await;

        assert!(second.generated_at >= first.generated_at);
        task.abort();
    }

    #[tokio::test]
    async fn test_failed_publish_returns_none() {
        let dir = tempdir().unwrap();
        // The store path is a directory, so the final rename fails
        let target = dir.path().join("snapshot.json");
        std::fs::create_dir(&target).unwrap();
        let store = Arc::new(SnapshotStore::open(&target));

        let scheduler = scheduler(store.clone(), Duration::from_secs(180));
        assert!(scheduler.refresh_once().await.is_none());
        assert!(store.current().is_none());
    }
}
