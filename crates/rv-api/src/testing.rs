//! Router fixtures for handler tests

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use rv_core::clock::ManualClock;
use rv_core::config::AppConfig;
use serde_json::Value;
use tower::ServiceExt;

use crate::{router, AppState};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

pub fn state() -> (AppState, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::at_date(today()));
    (AppState::offline(clock.clone(), &AppConfig::default()), clock)
}

pub fn app(state: AppState) -> Router {
    router().with_state(state)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

pub async fn send_raw(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Create a project through the API and return its id
pub async fn create_project(app: &Router, name: &str, amount: f64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/projects",
        Some(serde_json::json!({ "name": name, "amount": amount })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().unwrap()
}
