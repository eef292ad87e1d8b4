//! Import and export handlers
//!
//! Both act on the local store only.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::error::ApiResult;
use crate::extractors::AppState;

/// GET /api/export
pub async fn export(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let json = rv_services::export_json(state.store.read().list())?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"projects.json\""),
        ],
        json,
    ))
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
}

/// POST /api/import
///
/// The body is the exported JSON array; nothing changes unless all of it is valid.
pub async fn import(State(state): State<AppState>, body: String) -> ApiResult<Json<ImportResponse>> {
    let imported = rv_services::transfer::import_into(&mut state.store.write(), &body)?;
    Ok(Json(ImportResponse { imported }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::testing::{app, create_project, send, send_raw, state};

    #[tokio::test]
    async fn test_export_then_import() {
        let (state, _clock) = state();
        let app = app(state.clone());
        create_project(&app, "Exported", 30.0).await;

        let (status, exported) = send(&app, "GET", "/api/export", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(exported[0]["name"], json!("Exported"));

        create_project(&app, "Dropped on import", 1.0).await;
        let (status, body) = send_raw(&app, "POST", "/api/import", &exported.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "imported": 1 }));
        assert_eq!(state.store.read().list()[0].name, "Exported");
    }

    #[tokio::test]
    async fn test_import_rejects_non_array() {
        let (state, _clock) = state();
        let app = app(state.clone());
        create_project(&app, "Kept", 1.0).await;

        let (status, body) = send_raw(&app, "POST", "/api/import", r#"{"id": 1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(state.store.read().len(), 1);
    }
}
