//! Backup manager
//!
//! Snapshot history (newest first), the automatic backup state machine and
//! the pending restore.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Duration, Local, Utc};
use parking_lot::Mutex;
use rv_core::clock::Clock;
use rv_core::error::{RvError, ValidationErrors};
use rv_core::result::RvResult;
use rv_models::Project;
use rv_services::{ProjectStore, StoreHandle};
use tracing::{debug, info, warn};

use crate::snapshot::{Snapshot, SnapshotKind, MAX_SNAPSHOTS};

pub type SharedBackupManager = Arc<Mutex<BackupManager>>;

/// Live view of the store, read at capture time
pub trait SnapshotSource: Send + Sync {
    fn current_projects(&self) -> RvResult<Vec<Project>>;
}

impl SnapshotSource for StoreHandle {
    fn current_projects(&self) -> RvResult<Vec<Project>> {
        Ok(self.read().snapshot())
    }
}

/// Automatic backup settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoBackup {
    pub enabled: bool,
    pub interval_minutes: u32,
    /// Last automatic capture, or manager creation before the first one
    pub last_backup_at: DateTime<Utc>,
}

pub struct BackupManager {
    clock: Arc<dyn Clock>,
    history: VecDeque<Snapshot>,
    auto: AutoBackup,
    pending_restore: Option<i64>,
    last_id: i64,
}

impl BackupManager {
    pub fn new(clock: Arc<dyn Clock>, interval_minutes: u32) -> Self {
        let now = clock.now();
        Self {
            clock,
            history: VecDeque::with_capacity(MAX_SNAPSHOTS),
            auto: AutoBackup {
                enabled: false,
                interval_minutes: interval_minutes.max(1),
                last_backup_at: now,
            },
            pending_restore: None,
            last_id: 0,
        }
    }

    pub fn into_shared(self) -> SharedBackupManager {
        Arc::new(Mutex::new(self))
    }

    /// Snapshots, newest first
    pub fn history(&self) -> impl Iterator<Item = &Snapshot> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Snapshot> {
        self.history.iter().find(|s| s.id == id)
    }

    pub fn auto_backup(&self) -> AutoBackup {
        self.auto
    }

    // ------------------------------------------------------------------
    // Automatic backup state
    // ------------------------------------------------------------------

    pub fn enable_auto(&mut self, interval_minutes: u32) {
        self.set_interval(interval_minutes);
        self.auto.enabled = true;
        info!(interval_minutes = self.auto.interval_minutes, "Automatic backup enabled");
    }

    pub fn disable_auto(&mut self) {
        self.auto.enabled = false;
        info!("Automatic backup disabled");
    }

    /// Flip the automatic backup state, returning the new state
    pub fn toggle_auto(&mut self) -> bool {
        if self.auto.enabled {
            self.disable_auto();
        } else {
            self.enable_auto(self.auto.interval_minutes);
        }
        self.auto.enabled
    }

    /// Change the interval; values below one minute are raised to one
    pub fn set_interval(&mut self, minutes: u32) {
        self.auto.interval_minutes = minutes.max(1);
    }

    /// Whether an automatic capture is due now
    pub fn is_due(&self) -> bool {
        let interval = Duration::minutes(i64::from(self.auto.interval_minutes));
        self.auto.enabled && self.clock.now() - self.auto.last_backup_at >= interval
    }

    /// Poll once; captures from `source` when a backup is due
    pub fn tick(&mut self, source: &dyn SnapshotSource) -> Option<i64> {
        if !self.is_due() {
            return None;
        }
        let id = self.capture(source, SnapshotKind::Automatic)?;
        self.auto.last_backup_at = self.clock.now();
        Some(id)
    }

    /// Capture immediately, whatever the automatic state.
    ///
    /// Does not move the automatic schedule.
    pub fn manual_backup(&mut self, source: &dyn SnapshotSource) -> RvResult<i64> {
        let projects = source.current_projects()?;
        Ok(self.push(projects, SnapshotKind::Manual))
    }

    fn capture(&mut self, source: &dyn SnapshotSource, kind: SnapshotKind) -> Option<i64> {
        match source.current_projects() {
            Ok(projects) => Some(self.push(projects, kind)),
            Err(e) => {
                warn!(error = %e, ?kind, "Snapshot capture failed, history unchanged");
                None
            }
        }
    }

    fn push(&mut self, data: Vec<Project>, kind: SnapshotKind) -> i64 {
        let now = self.clock.now();
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;

        let snapshot = Snapshot {
            id,
            timestamp: now.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
            kind,
            data,
        };
        info!(snapshot_id = id, ?kind, projects = snapshot.project_count(), "Snapshot captured");

        self.history.push_front(snapshot);
        while self.history.len() > MAX_SNAPSHOTS {
            if let Some(evicted) = self.history.pop_back() {
                debug!(snapshot_id = evicted.id, "Snapshot evicted");
            }
        }
        id
    }

    // ------------------------------------------------------------------
    // Restore
    // ------------------------------------------------------------------

    /// First step: mark a snapshot for restore
    pub fn request_restore(&mut self, id: i64) -> RvResult<&Snapshot> {
        let index = self
            .history
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| RvError::not_found("Snapshot", id))?;
        self.pending_restore = Some(id);
        debug!(snapshot_id = id, "Restore requested");
        Ok(&self.history[index])
    }

    pub fn pending_restore(&self) -> Option<i64> {
        self.pending_restore
    }

    /// Drop a pending restore; returns whether one was pending
    pub fn cancel_restore(&mut self) -> bool {
        let cancelled = self.pending_restore.take();
        if let Some(id) = cancelled {
            debug!(snapshot_id = id, "Restore cancelled");
        }
        cancelled.is_some()
    }

    /// Second step: replace the store with the requested snapshot.
    ///
    /// A failed restore stays pending so it can be retried or cancelled.
    pub fn confirm_restore(&mut self, store: &mut ProjectStore) -> RvResult<i64> {
        let Some(id) = self.pending_restore else {
            let mut errors = ValidationErrors::new();
            errors.add_base("no restore has been requested");
            return Err(RvError::Validation(errors));
        };
        let Some(snapshot) = self.get(id) else {
            self.pending_restore = None;
            return Err(RvError::not_found("Snapshot", id));
        };

        store.replace_all(snapshot.data.clone())?;
        self.pending_restore = None;
        info!(snapshot_id = id, projects = store.len(), "Store restored from snapshot");
        Ok(id)
    }
}
