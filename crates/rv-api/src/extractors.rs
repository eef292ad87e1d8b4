//! Application state and request extractors

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use reqwest::Client;
use rv_ai::{select_generator, AiAssistant, ProviderCredentials, RetryPolicy};
use rv_backups::{BackupManager, SharedBackupManager};
use rv_core::clock::Clock;
use rv_core::config::{AiConfig, AiSettings, AppConfig};
use rv_services::{ProjectStore, StoreHandle};
use rv_sync::SyncedStore;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::error::ApiError;

/// Application state
///
/// `store` is read directly; every mutation goes through `sync`, whose
/// async mutex admits one outstanding mutation at a time.
#[derive(Clone)]
pub struct AppState {
    pub store: StoreHandle,
    pub sync: Arc<Mutex<SyncedStore>>,
    pub backups: SharedBackupManager,
    pub ai: Arc<AiState>,
}

impl AppState {
    pub fn new(sync: SyncedStore, backups: SharedBackupManager, ai: AiState) -> Self {
        Self {
            store: sync.store().clone(),
            sync: Arc::new(Mutex::new(sync)),
            backups,
            ai: Arc::new(ai),
        }
    }

    /// In-memory state with no remote service
    pub fn offline(clock: Arc<dyn Clock>, config: &AppConfig) -> Self {
        let store = rv_services::shared(ProjectStore::new(clock.clone()));
        let backups = BackupManager::new(clock, config.backup.interval_minutes).into_shared();
        Self::new(
            SyncedStore::offline(store),
            backups,
            AiState::new(config.ai.clone(), &AiSettings::default()),
        )
    }
}

/// AI provider configuration with the persisted credentials
pub struct AiState {
    config: AiConfig,
    stored: ProviderCredentials,
    client: Client,
}

impl AiState {
    pub fn new(config: AiConfig, settings: &AiSettings) -> Self {
        Self {
            config,
            stored: ProviderCredentials::new(
                Some(settings.api_key.clone()),
                Some(settings.endpoint_id.clone()),
            ),
            client: Client::new(),
        }
    }

    /// Request values win over persisted settings, which win over the environment
    pub fn credentials(&self, request: ProviderCredentials) -> ProviderCredentials {
        request
            .or(self.stored.clone())
            .or(ProviderCredentials::from_config(&self.config))
    }

    pub fn assistant(&self, request: ProviderCredentials, policy: RetryPolicy) -> AiAssistant {
        let generator = select_generator(self.client.clone(), &self.config, self.credentials(request));
        AiAssistant::new(generator, policy)
    }

    /// Retry policy from configuration
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::from_config(&self.config)
    }
}

/// JSON body extractor whose rejections use the API error shape
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        Ok(ApiJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_precedence() {
        let mut config = AppConfig::default().ai;
        config.api_key = Some("sk-env".to_string());
        config.endpoint_id = Some("ep-env".to_string());

        let settings = AiSettings {
            api_key: "sk-stored".to_string(),
            endpoint_id: String::new(),
        };
        let ai = AiState::new(config, &settings);

        let resolved = ai.credentials(ProviderCredentials::default());
        assert_eq!(resolved.api_key.as_deref(), Some("sk-stored"));
        assert_eq!(resolved.endpoint_id.as_deref(), Some("ep-env"));

        let resolved = ai.credentials(ProviderCredentials::new(Some("sk-request".to_string()), None));
        assert_eq!(resolved.api_key.as_deref(), Some("sk-request"));
    }
}
