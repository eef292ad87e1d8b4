//! Payment API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use rv_core::traits::Id;
use rv_models::NewPayment;

use super::projects::log_fallback;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{ApiJson, AppState};
use crate::representers::{MessageResponse, PaymentRow};

/// POST /api/projects/:id/payments
pub async fn add_payment(
    State(state): State<AppState>,
    Path(project_id): Path<Id>,
    ApiJson(draft): ApiJson<NewPayment>,
) -> ApiResult<Json<PaymentRow>> {
    let result = state.sync.lock().await.add_payment(project_id, draft).await?;
    log_fallback(&result, "add_payment");

    let project = result.into_inner();
    let payment = project
        .payments
        .last()
        .ok_or_else(|| ApiError::internal("payment missing from the updated project"))?;
    Ok(Json(PaymentRow::new(project_id, payment)))
}

/// DELETE /api/payments/:id
pub async fn delete_payment(State(state): State<AppState>, Path(payment_id): Path<Id>) -> ApiResult<Json<MessageResponse>> {
    let owner = state
        .store
        .read()
        .find_payment_owner(payment_id)
        .ok_or_else(|| ApiError::not_found("Payment", payment_id))?;

    let result = state.sync.lock().await.delete_payment(owner, payment_id).await?;
    log_fallback(&result, "delete_payment");
    Ok(Json(MessageResponse::new("Payment deleted")))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::testing::{app, create_project, send, state};

    #[tokio::test]
    async fn test_payment_lifecycle_updates_collected() {
        let (state, _clock) = state();
        let app = app(state);
        let id = create_project(&app, "Ledger", 100.0).await;

        let (status, row) = send(
            &app,
            "POST",
            &format!("/api/projects/{}/payments", id),
            Some(json!({ "date": "2024-05-01", "amount": 40 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(row["project_id"], json!(id));
        assert_eq!(row["date"], json!("2024-05-01"));
        assert_eq!(row["amount"], json!(40.0));

        let (_, project) = send(&app, "GET", &format!("/api/projects/{}", id), None).await;
        assert_eq!(project["collected"], json!(40.0));

        let payment_id = row["id"].as_i64().unwrap();
        let (status, body) = send(&app, "DELETE", &format!("/api/payments/{}", payment_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Payment deleted" }));

        let (_, project) = send(&app, "GET", &format!("/api/projects/{}", id), None).await;
        assert_eq!(project["collected"], json!(0.0));
    }

    #[tokio::test]
    async fn test_settling_payment_completes_project() {
        let (state, _clock) = state();
        let app = app(state);
        let id = create_project(&app, "Settled", 100.0).await;

        send(
            &app,
            "POST",
            &format!("/api/projects/{}/payments", id),
            Some(json!({ "date": "2024-05-01", "amount": 100 })),
        )
        .await;

        let (_, project) = send(&app, "GET", &format!("/api/projects/{}", id), None).await;
        assert_eq!(project["status"], json!("completed"));
    }

    #[tokio::test]
    async fn test_payment_errors() {
        let (state, _clock) = state();
        let app = app(state);

        let (status, _) = send(
            &app,
            "POST",
            "/api/projects/99/payments",
            Some(json!({ "date": "2024-05-01", "amount": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let id = create_project(&app, "Strict", 10.0).await;
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/projects/{}/payments", id),
            Some(json!({ "date": "2024-05-01" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send(&app, "DELETE", "/api/payments/12345", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Payment not found" }));
    }
}
