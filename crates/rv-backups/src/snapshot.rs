//! Snapshot record

use rv_models::Project;
use serde::{Deserialize, Serialize};

/// History length; older snapshots are evicted first
pub const MAX_SNAPSHOTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotKind {
    Manual,
    Automatic,
}

/// Immutable copy of the whole store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Capture time in milliseconds, strictly increasing within a manager
    pub id: i64,
    /// Local capture time, for display
    pub timestamp: String,
    pub kind: SnapshotKind,
    pub data: Vec<Project>,
}

impl Snapshot {
    pub fn project_count(&self) -> usize {
        self.data.len()
    }
}
