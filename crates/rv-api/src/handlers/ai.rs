//! AI handlers
//!
//! `/api/ai/generate` always answers 200 with `{ text }`; provider failures
//! are reported inside the text.

use axum::{
    extract::{Path, State},
    Json,
};
use rv_ai::{ProviderCredentials, RetryPolicy};
use rv_core::traits::Id;
use rv_models::CreateProjectDto;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{ApiJson, AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateRequest {
    pub prompt: String,
    pub api_key: Option<String>,
    pub endpoint_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SmartFillRequest {
    pub text: String,
}

/// POST /api/ai/generate
///
/// One provider attempt; callers own the retrying.
pub async fn generate(
    State(state): State<AppState>,
    body: Option<ApiJson<GenerateRequest>>,
) -> Json<TextResponse> {
    let ApiJson(request) = body.unwrap_or_else(|| ApiJson(GenerateRequest::default()));
    let credentials = ProviderCredentials::new(request.api_key, request.endpoint_id);
    let assistant = state.ai.assistant(credentials, RetryPolicy::once());
    Json(TextResponse {
        text: assistant.generate(&request.prompt).await,
    })
}

/// POST /api/projects/:id/ai/collection-letter
pub async fn collection_letter(State(state): State<AppState>, Path(id): Path<Id>) -> ApiResult<Json<TextResponse>> {
    let project = state
        .store
        .read()
        .get(id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Project", id))?;
    let assistant = state.ai.assistant(ProviderCredentials::default(), state.ai.policy());
    Ok(Json(TextResponse {
        text: assistant.collection_letter(&project).await,
    }))
}

/// POST /api/projects/:id/ai/risk-summary
pub async fn risk_summary(State(state): State<AppState>, Path(id): Path<Id>) -> ApiResult<Json<TextResponse>> {
    let project = state
        .store
        .read()
        .get(id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Project", id))?;
    let assistant = state.ai.assistant(ProviderCredentials::default(), state.ai.policy());
    Ok(Json(TextResponse {
        text: assistant.risk_summary(&project).await,
    }))
}

/// POST /api/ai/smart-fill
pub async fn smart_fill(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SmartFillRequest>,
) -> ApiResult<Json<CreateProjectDto>> {
    let assistant = state.ai.assistant(ProviderCredentials::default(), state.ai.policy());
    Ok(Json(assistant.smart_fill(&request.text).await?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rv_ai::CannedGenerator;
    use serde_json::json;

    use crate::testing::{app, create_project, send, send_raw, state};

    #[tokio::test]
    async fn test_generate_without_key_is_canned() {
        let (state, _clock) = state();
        let app = app(state);

        let (status, body) = send(
            &app,
            "POST",
            "/api/ai/generate",
            Some(json!({ "prompt": "Draft a collection reminder", "apiKey": "", "endpointId": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], json!(CannedGenerator::COLLECTION));
    }

    #[tokio::test]
    async fn test_generate_tolerates_missing_body() {
        let (state, _clock) = state();
        let app = app(state);

        let (status, body) = send_raw(&app, "POST", "/api/ai/generate", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], json!(CannedGenerator::DEFAULT));
    }

    #[tokio::test]
    async fn test_project_prompts() {
        let (state, _clock) = state();
        let app = app(state);
        let id = create_project(&app, "Prompted", 100.0).await;

        let (status, body) = send(&app, "POST", &format!("/api/projects/{}/ai/risk-summary", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], json!(CannedGenerator::RISK));

        let (_, body) = send(&app, "POST", &format!("/api/projects/{}/ai/collection-letter", id), None).await;
        assert_eq!(body["text"], json!(CannedGenerator::COLLECTION));

        let (status, _) = send(&app, "POST", "/api/projects/404/ai/risk-summary", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_smart_fill_offline_is_bad_request() {
        let (state, _clock) = state();
        let app = app(state);

        let (status, body) = send(&app, "POST", "/api/ai/smart-fill", Some(json!({ "text": "Acme, 50k" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("not a project object"));
    }
}
