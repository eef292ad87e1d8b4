//! # rv-backups
//!
//! Point-in-time copies of the project store.
//!
//! - [`BackupManager`] keeps the newest [`MAX_SNAPSHOTS`] snapshots and
//!   handles the two-step restore.
//! - [`AutoBackupScheduler`] polls the manager on a fixed period and lets it
//!   capture the live store once the configured interval has elapsed.

pub mod manager;
pub mod scheduler;
pub mod snapshot;

pub use manager::{AutoBackup, BackupManager, SharedBackupManager, SnapshotSource};
pub use scheduler::AutoBackupScheduler;
pub use snapshot::{Snapshot, SnapshotKind, MAX_SNAPSHOTS};
