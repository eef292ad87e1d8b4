//! Receivables RS Server
//!
//! Serves the project, payment, backup and AI routes over an in-memory store.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rv_api::{AiState, AppState};
use rv_backups::{AutoBackupScheduler, BackupManager, SnapshotSource};
use rv_core::clock::{Clock, SystemClock};
use rv_core::config::{AppConfig, ConfigStore, Settings, SyncMode};
use rv_services::ProjectStore;
use rv_sync::SyncedStore;

mod health;

use health::HealthChecker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize structured logging
    init_tracing();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        warn!("Failed to load config from env: {}, using defaults", e);
        AppConfig::default()
    });

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        sync_mode = ?config.sync.mode,
        "Starting Receivables RS"
    );

    let settings = load_settings(&config);

    // Store and sync coordinator
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = rv_services::shared(ProjectStore::new(clock.clone()));
    let mut sync = SyncedStore::from_config(&config.sync, store.clone())?;
    if sync.mode() != SyncMode::Offline {
        match sync.refresh().await {
            Ok(result) => info!(projects = *result.value(), "Loaded projects from remote"),
            Err(e) => warn!("Initial refresh failed: {}. Starting with an empty store.", e),
        }
    }

    // Backups
    let mut manager = BackupManager::new(clock, config.backup.interval_minutes);
    if config.backup.auto_enabled {
        manager.enable_auto(config.backup.interval_minutes);
    }
    let backups = manager.into_shared();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let source: Arc<dyn SnapshotSource> = Arc::new(store);
    let scheduler = AutoBackupScheduler::new(
        backups.clone(),
        source,
        Duration::from_secs(config.backup.poll_seconds.max(1)),
    )
    .spawn(shutdown_rx);

    let state = AppState::new(sync, backups, AiState::new(config.ai.clone(), &settings.ai));
    let app = build_router(state);

    // Start server
    let addr = config.server_addr();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    scheduler.await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging; `RV_LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let json = std::env::var("RV_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,rv_server=debug,rv_api=debug,tower_http=debug".into()
            }),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| {
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
        }))
        .init();
}

/// Read persisted settings, writing the defaults on first start
fn load_settings(config: &AppConfig) -> Settings {
    let store = ConfigStore::new(config.settings_path.clone());
    let settings = store.load().unwrap_or_else(|e| {
        warn!("Failed to load settings: {}, using defaults", e);
        Settings::default()
    });

    if !store.path().exists() {
        match store.save(&settings) {
            Ok(()) => info!(path = %store.path().display(), "Wrote default settings"),
            Err(e) => warn!("Failed to write default settings: {}", e),
        }
    }
    settings
}

/// Build the application router
fn build_router(state: AppState) -> Router {
    let checker = Arc::new(HealthChecker::new(state.clone()));

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(checker);

    Router::new()
        .merge(health_routes)
        .merge(rv_api::router().with_state(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let state = AppState::offline(Arc::new(SystemClock), &AppConfig::default());
        build_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_is_mounted() {
        let app = test_app();

        let response = app
            .oneshot(Request::builder().uri("/api/projects").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let app = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/projects")
                    .header("origin", "http://localhost:5173")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("access-control-allow-origin"));
    }

    #[test]
    fn test_default_settings_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.settings_path = dir.path().join("settings.json");

        let settings = load_settings(&config);
        assert_eq!(settings, Settings::default());
        assert!(config.settings_path.exists());
        assert_eq!(load_settings(&config), settings);
    }
}
