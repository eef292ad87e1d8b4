//! Statistics handlers

use axum::{extract::State, Json};

use crate::extractors::AppState;
use crate::representers::DashboardStats;

/// GET /api/stats
pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardStats> {
    let store = state.store.read();
    Json(DashboardStats::compute(store.list(), store.today()))
}
