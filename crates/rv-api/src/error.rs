//! API error handling
//!
//! Errors leave the API as `{ "error": message }` with a matching status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rv_core::error::{RvError, ValidationErrors};
use serde::Serialize;
use tracing::{debug, error};

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound { resource: &'static str, id: String },
    Validation(ValidationErrors),
    BadRequest(String),
    BadGateway(String),
    Internal(String),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound { resource, id: id.to_string() }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::NotFound { resource, .. } => format!("{} not found", resource),
            ApiError::Validation(errors) => errors.full_messages().join(", "),
            ApiError::BadRequest(msg) | ApiError::BadGateway(msg) | ApiError::Internal(msg) => msg.clone(),
        }
    }
}

impl From<RvError> for ApiError {
    fn from(err: RvError) -> Self {
        match err {
            RvError::Validation(errors) => ApiError::Validation(errors),
            RvError::NotFound { entity, value, .. } => ApiError::NotFound { resource: entity, id: value },
            RvError::Format(msg) => ApiError::BadRequest(msg),
            err @ RvError::Transport { .. } => ApiError::BadGateway(err.to_string()),
            err @ (RvError::Config(_) | RvError::Internal(_)) => ApiError::Internal(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::NotFound { resource, id } => debug!(resource, %id, "Resource not found"),
            _ if status.is_server_error() => error!(%status, error = %self.message(), "Request failed"),
            _ => {}
        }
        (status, Json(ErrorBody { error: self.message() })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
