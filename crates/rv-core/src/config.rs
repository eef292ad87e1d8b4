//! Configuration types and loading
//!
//! [`AppConfig`] is process configuration read once at startup. [`Settings`]
//! are the user-editable values (credentials, AI provider) persisted by a
//! [`ConfigStore`] with explicit load and save points.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::RvError;
use crate::result::RvResult;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Remote sync configuration
    pub sync: SyncConfig,

    /// Automatic backup configuration
    pub backup: BackupConfig,

    /// AI provider configuration
    pub ai: AiConfig,

    /// Where the persisted [`Settings`] live
    pub settings_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// How store mutations reach the remote service
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Local store only, no remote calls
    #[default]
    Offline,
    /// Remote failures are returned to the caller
    Strict,
    /// Transport failures fall back to the local store
    Permissive,
}

impl FromStr for SyncMode {
    type Err = RvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offline" | "mock" => Ok(SyncMode::Offline),
            "strict" => Ok(SyncMode::Strict),
            "permissive" | "fallback" => Ok(SyncMode::Permissive),
            other => Err(RvError::Config(format!("unknown sync mode: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    pub mode: SyncMode,
    pub remote_url: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackupConfig {
    pub auto_enabled: bool,
    /// Minimum minutes between automatic snapshots
    pub interval_minutes: u32,
    /// How often the scheduler checks whether a snapshot is due
    pub poll_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AiConfig {
    /// OpenAI-compatible base URL, without the `/chat/completions` suffix
    pub base_url: String,
    pub api_key: Option<String>,
    pub endpoint_id: Option<String>,
    pub max_attempts: u32,
    pub retry_delays_ms: Vec<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3001,
            },
            sync: SyncConfig {
                mode: SyncMode::Offline,
                remote_url: "http://localhost:3001/api".to_string(),
                request_timeout_seconds: 15,
            },
            backup: BackupConfig {
                auto_enabled: false,
                interval_minutes: 30,
                poll_seconds: 10,
            },
            ai: AiConfig {
                base_url: "https://ark.cn-beijing.volces.com/api/v3".to_string(),
                api_key: None,
                endpoint_id: None,
                max_attempts: 3,
                retry_delays_ms: vec![1000, 2000, 4000],
            },
            settings_path: PathBuf::from("receivables-settings.json"),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> RvResult<Self> {
        let mut config = Self::default();
        let parse_bool = |v: String| v == "true" || v == "1" || v == "yes";

        // Server
        if let Ok(host) = std::env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port.parse().unwrap_or(3001);
        }

        // Sync
        if let Ok(mode) = std::env::var("RV_SYNC_MODE") {
            config.sync.mode = mode.parse()?;
        }
        if let Ok(url) = std::env::var("RV_REMOTE_URL") {
            config.sync.remote_url = url;
        }
        if let Ok(timeout) = std::env::var("RV_REQUEST_TIMEOUT_SECONDS") {
            config.sync.request_timeout_seconds = timeout.parse().unwrap_or(15);
        }

        // Backups
        if let Ok(v) = std::env::var("RV_AUTO_BACKUP") {
            config.backup.auto_enabled = parse_bool(v);
        }
        if let Ok(v) = std::env::var("RV_BACKUP_INTERVAL_MINUTES") {
            config.backup.interval_minutes = v.parse().unwrap_or(30);
        }

        // AI
        if let Ok(url) = std::env::var("RV_AI_BASE_URL") {
            config.ai.base_url = url;
        }
        if let Ok(key) = std::env::var("RV_AI_API_KEY") {
            config.ai.api_key = Some(key).filter(|k| !k.is_empty());
        }
        if let Ok(endpoint) = std::env::var("RV_AI_ENDPOINT_ID") {
            config.ai.endpoint_id = Some(endpoint).filter(|e| !e.is_empty());
        }

        if let Ok(path) = std::env::var("RV_SETTINGS_PATH") {
            config.settings_path = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Get the server address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::SocketAddr;
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or([0, 0, 0, 0].into());
        SocketAddr::new(ip, self.server.port)
    }
}

/// Persisted user settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub credentials: Credentials,
    pub ai: AiSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub secret_key: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin".to_string(),
            secret_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AiSettings {
    pub api_key: String,
    pub endpoint_id: String,
}

/// File-backed settings store
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the settings file, layered with `RV_SETTINGS__*` overrides.
    ///
    /// A missing file yields defaults.
    pub fn load(&self) -> RvResult<Settings> {
        let file = config::File::new(&self.path.to_string_lossy(), config::FileFormat::Json)
            .required(false);

        config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix("RV_SETTINGS").separator("__"))
            .build()
            .and_then(|c| c.try_deserialize::<Settings>())
            .map_err(|e| RvError::Config(e.to_string()))
    }

    pub fn save(&self, settings: &Settings) -> RvResult<()> {
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| RvError::Internal(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| {
            RvError::Config(format!("cannot write {}: {}", self.path.display(), e))
        })?;
        tracing::debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}
