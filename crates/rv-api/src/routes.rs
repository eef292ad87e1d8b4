//! API routes

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::{ai, backups, payments, projects, stats, transfer};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new().nest("/api", api_router())
}

fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/projects", projects_router())
        .route("/payments/:id", delete(payments::delete_payment))
        .route("/ai/generate", post(ai::generate))
        .route("/ai/smart-fill", post(ai::smart_fill))
        .route("/stats", get(stats::dashboard))
        .route("/export", get(transfer::export))
        .route("/import", post(transfer::import))
        .route("/sync/refresh", post(projects::refresh))
        .nest("/backups", backups_router())
        .route("/restore", delete(backups::cancel_restore))
        .route("/restore/confirm", post(backups::confirm_restore))
}

fn projects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list_projects).post(projects::create_project))
        .route("/:id", get(projects::get_project).delete(projects::delete_project))
        .route("/:id/summary", get(projects::project_summary))
        .route("/:id/payments", post(payments::add_payment))
        .route("/:id/ai/collection-letter", post(ai::collection_letter))
        .route("/:id/ai/risk-summary", post(ai::risk_summary))
}

fn backups_router() -> Router<AppState> {
    Router::new()
        .route("/", get(backups::list_backups).post(backups::create_backup))
        .route("/auto", put(backups::configure_auto))
        .route("/:id", get(backups::get_backup))
        .route("/:id/restore", post(backups::request_restore))
}
