//! JSON import and export
//!
//! The canonical backup format is a JSON array of project records, each
//! with its nested payments.

use rv_core::error::RvError;
use rv_core::result::RvResult;
use rv_models::Project;
use serde_json::Value;
use tracing::info;

use crate::store::ProjectStore;

/// Pretty-printed JSON array of `projects`
pub fn export_json(projects: &[Project]) -> RvResult<String> {
    serde_json::to_string_pretty(projects).map_err(|e| RvError::Internal(e.to_string()))
}

/// Parse a JSON array of project records.
///
/// Fails with a format error naming the first bad element.
pub fn import_json(text: &str) -> RvResult<Vec<Project>> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| RvError::format(format!("not valid JSON: {}", e)))?;

    let Value::Array(items) = value else {
        return Err(RvError::format("expected a JSON array of projects"));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Project>(item)
                .map_err(|e| RvError::format(format!("record {}: {}", index, e)))
        })
        .collect()
}

/// Parse `text` and replace the store contents with it
pub fn import_into(store: &mut ProjectStore, text: &str) -> RvResult<usize> {
    let projects = import_json(text)?;
    let count = projects.len();
    store.replace_all(projects)?;

    info!(projects = count, "Projects imported");
    Ok(count)
}
