//! Health Check System
//!
//! Reports on the in-memory store, the backup manager and the sync mode.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::Json;
use rv_api::AppState;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Health check status; a busy component degrades the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Individual component health
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Overall health report
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Health checker service
pub struct HealthChecker {
    state: AppState,
    start_time: Instant,
}

impl HealthChecker {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            start_time: Instant::now(),
        }
    }

    pub async fn check(&self) -> HealthReport {
        let components = vec![self.check_store(), self.check_backups(), self.check_sync()];
        let status = if components.iter().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };
        debug!(?status, "Health checked");

        HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            components,
            timestamp: chrono::Utc::now(),
        }
    }

    fn check_store(&self) -> ComponentHealth {
        let store = self.state.store.read();
        ComponentHealth {
            name: "store".to_string(),
            status: HealthStatus::Healthy,
            message: None,
            details: Some(serde_json::json!({
                "projects": store.len(),
                "today": store.today(),
            })),
        }
    }

    fn check_backups(&self) -> ComponentHealth {
        let backups = self.state.backups.lock();
        let auto = backups.auto_backup();
        ComponentHealth {
            name: "backups".to_string(),
            status: HealthStatus::Healthy,
            message: None,
            details: Some(serde_json::json!({
                "snapshots": backups.len(),
                "auto_enabled": auto.enabled,
                "interval_minutes": auto.interval_minutes,
            })),
        }
    }

    /// Reports busy while a mutation is waiting on the remote service
    fn check_sync(&self) -> ComponentHealth {
        match self.state.sync.try_lock() {
            Ok(sync) => ComponentHealth {
                name: "sync".to_string(),
                status: HealthStatus::Healthy,
                message: None,
                details: Some(serde_json::json!({ "mode": sync.mode() })),
            },
            Err(_) => ComponentHealth {
                name: "sync".to_string(),
                status: HealthStatus::Degraded,
                message: Some("Mutation in progress".to_string()),
                details: None,
            },
        }
    }
}

/// Simple liveness check
pub async fn liveness() -> &'static str {
    "OK"
}

/// Full health check
pub async fn health(State(checker): State<Arc<HealthChecker>>) -> Json<HealthReport> {
    Json(checker.check().await)
}
