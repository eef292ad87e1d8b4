//! Backup and restore handlers
//!
//! Restoring takes two requests: one to pick the snapshot, one to confirm.
//! The manager is always locked before the store.

use axum::{
    extract::{Path, State},
    Json,
};
use rv_backups::Snapshot;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{ApiJson, AppState};
use crate::representers::{
    AutoBackupRepresentation, BackupStatus, MessageResponse, RestoreOutcome, SnapshotSummary,
};

/// GET /api/backups
pub async fn list_backups(State(state): State<AppState>) -> Json<BackupStatus> {
    Json(BackupStatus::represent(&state.backups.lock()))
}

/// POST /api/backups
pub async fn create_backup(State(state): State<AppState>) -> ApiResult<Json<SnapshotSummary>> {
    let mut backups = state.backups.lock();
    let id = backups.manual_backup(&state.store)?;
    let snapshot = backups.get(id).ok_or_else(|| ApiError::not_found("Snapshot", id))?;
    Ok(Json(SnapshotSummary::from(snapshot)))
}

/// GET /api/backups/:id
pub async fn get_backup(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Snapshot>> {
    state
        .backups
        .lock()
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Snapshot", id))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoBackupRequest {
    pub enabled: bool,
    pub interval_minutes: Option<u32>,
}

/// PUT /api/backups/auto
pub async fn configure_auto(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AutoBackupRequest>,
) -> Json<AutoBackupRepresentation> {
    let mut backups = state.backups.lock();
    if let Some(minutes) = request.interval_minutes {
        backups.set_interval(minutes);
    }
    if request.enabled {
        let interval = backups.auto_backup().interval_minutes;
        backups.enable_auto(interval);
    } else {
        backups.disable_auto();
    }
    Json(backups.auto_backup().into())
}

/// POST /api/backups/:id/restore
pub async fn request_restore(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<SnapshotSummary>> {
    let mut backups = state.backups.lock();
    let snapshot = backups.request_restore(id)?;
    Ok(Json(SnapshotSummary::from(snapshot)))
}

/// POST /api/restore/confirm
pub async fn confirm_restore(State(state): State<AppState>) -> ApiResult<Json<RestoreOutcome>> {
    let mut backups = state.backups.lock();
    let mut store = state.store.write();
    let snapshot_id = backups.confirm_restore(&mut store)?;
    Ok(Json(RestoreOutcome {
        message: "Restored".to_string(),
        snapshot_id,
        projects: store.len(),
    }))
}

/// DELETE /api/restore
pub async fn cancel_restore(State(state): State<AppState>) -> Json<MessageResponse> {
    let message = if state.backups.lock().cancel_restore() {
        "Restore cancelled"
    } else {
        "No restore pending"
    };
    Json(MessageResponse::new(message))
}
