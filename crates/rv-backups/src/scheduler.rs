//! Automatic backup scheduler
//!
//! Polls the manager on a fixed period. The store is read through the
//! [`SnapshotSource`] at fire time, so a capture always sees live data.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::manager::{SharedBackupManager, SnapshotSource};

pub struct AutoBackupScheduler {
    manager: SharedBackupManager,
    source: Arc<dyn SnapshotSource>,
    poll: Duration,
}

impl AutoBackupScheduler {
    pub fn new(manager: SharedBackupManager, source: Arc<dyn SnapshotSource>, poll: Duration) -> Self {
        Self {
            manager,
            source,
            poll,
        }
    }

    /// Run the polling loop until `shutdown` flips to `true` or its sender is dropped
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = time::interval(self.poll);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(poll_seconds = self.poll.as_secs(), "Backup scheduler started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {
                    let captured = self.manager.lock().tick(self.source.as_ref());
                    if let Some(snapshot_id) = captured {
                        debug!(snapshot_id, "Automatic backup taken");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        info!("Backup scheduler stopped");
    }

    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
