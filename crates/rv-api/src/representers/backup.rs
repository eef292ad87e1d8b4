//! Backup representers

use chrono::{DateTime, Utc};
use rv_backups::{AutoBackup, BackupManager, Snapshot, SnapshotKind};
use serde::Serialize;

/// A snapshot without its data
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSummary {
    pub id: i64,
    pub timestamp: String,
    pub kind: SnapshotKind,
    pub project_count: usize,
}

impl From<&Snapshot> for SnapshotSummary {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            id: snapshot.id,
            timestamp: snapshot.timestamp.clone(),
            kind: snapshot.kind,
            project_count: snapshot.project_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoBackupRepresentation {
    pub enabled: bool,
    pub interval_minutes: u32,
    pub last_backup_at: DateTime<Utc>,
}

impl From<AutoBackup> for AutoBackupRepresentation {
    fn from(auto: AutoBackup) -> Self {
        Self {
            enabled: auto.enabled,
            interval_minutes: auto.interval_minutes,
            last_backup_at: auto.last_backup_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupStatus {
    pub auto: AutoBackupRepresentation,
    pub pending_restore: Option<i64>,
    /// Newest first
    pub snapshots: Vec<SnapshotSummary>,
}

impl BackupStatus {
    pub fn represent(manager: &BackupManager) -> Self {
        Self {
            auto: manager.auto_backup().into(),
            pending_restore: manager.pending_restore(),
            snapshots: manager.history().map(SnapshotSummary::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreOutcome {
    pub message: String,
    pub snapshot_id: i64,
    pub projects: usize,
}
