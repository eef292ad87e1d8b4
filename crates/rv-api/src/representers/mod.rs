//! Response bodies
//!
//! Projects serialize as themselves; these are the other shapes the API
//! returns.

pub mod backup;
pub mod payment;
pub mod project;
pub mod stats;

pub use backup::{AutoBackupRepresentation, BackupStatus, RestoreOutcome, SnapshotSummary};
pub use payment::PaymentRow;
pub use project::ProjectSummary;
pub use stats::DashboardStats;

use serde::Serialize;

/// `{ "message": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Body of a project deletion; `changes` is 0 when nothing matched
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub changes: u64,
}

impl DeleteResponse {
    pub fn new(changes: u64) -> Self {
        Self {
            message: "Deleted".to_string(),
            changes,
        }
    }
}
