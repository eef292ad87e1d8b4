//! Project API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use rv_core::traits::Id;
use rv_models::{CreateProjectDto, Project};
use rv_sync::SyncResult;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{ApiJson, AppState};
use crate::representers::{DeleteResponse, ProjectSummary};

/// GET /api/projects
pub async fn list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    Json(state.store.read().snapshot())
}

/// GET /api/projects/:id
pub async fn get_project(State(state): State<AppState>, Path(id): Path<Id>) -> ApiResult<Json<Project>> {
    state
        .store
        .read()
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Project", id))
}

/// GET /api/projects/:id/summary
pub async fn project_summary(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<Json<ProjectSummary>> {
    let store = state.store.read();
    let project = store.get(id).ok_or_else(|| ApiError::not_found("Project", id))?;
    Ok(Json(ProjectSummary::represent(project, store.today())))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<CreateProjectDto>,
) -> ApiResult<Json<Project>> {
    let result = state.sync.lock().await.create_project(draft).await?;
    log_fallback(&result, "create_project");
    Ok(Json(result.into_inner()))
}

/// DELETE /api/projects/:id
///
/// Unknown ids answer with zero changes rather than 404.
pub async fn delete_project(State(state): State<AppState>, Path(id): Path<Id>) -> ApiResult<Json<DeleteResponse>> {
    match state.sync.lock().await.delete_project(id).await {
        Ok(result) => {
            log_fallback(&result, "delete_project");
            Ok(Json(DeleteResponse::new(1)))
        }
        Err(e) if e.is_not_found() => Ok(Json(DeleteResponse::new(0))),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub projects: usize,
    pub source: &'static str,
}

/// POST /api/sync/refresh
pub async fn refresh(State(state): State<AppState>) -> ApiResult<Json<RefreshResponse>> {
    let result = state.sync.lock().await.refresh().await?;
    let source = if result.is_fallback() { "local" } else { "remote" };
    let projects = result.into_inner();
    info!(projects, source, "Projects refreshed");
    Ok(Json(RefreshResponse { projects, source }))
}

pub(crate) fn log_fallback<T>(result: &SyncResult<T>, operation: &'static str) {
    if result.is_fallback() {
        warn!(operation, "Applied to the local store only");
    }
}
