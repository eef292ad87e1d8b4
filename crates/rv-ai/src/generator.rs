//! Text generation boundary

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use rv_core::config::AiConfig;
use rv_core::result::RvResult;
use tracing::debug;

use crate::chat::ChatCompletionsGenerator;

/// A single text-in, text-out provider call.
///
/// Implementations make one attempt; retrying is the caller's business.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> RvResult<String>;
}

/// Offline stand-in used when no provider is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedGenerator;

impl CannedGenerator {
    pub const COLLECTION: &'static str = "[Simulated AI response - no API key configured]\n\n\
Dear [Client] finance team,\n\n\
Regarding the payment for [Project] (amount: [xx]), which under the contract was due on [date]: \
the payment term has now passed, and we kindly ask you to arrange the payment at your earliest convenience.\n\n\
Please contact me with any questions.\n\nThank you!";

    pub const RISK: &'static str = "[Simulated AI response - no API key configured]\n\n\
Risk level: medium\n\n\
Recommendations:\n\
1. Collection is behind schedule; follow up more frequently.\n\
2. The client's credit is sound but recent payments have been slow.\n\
3. Send a formal reminder and have the project manager follow up by phone.";

    pub const DEFAULT: &'static str = "[Simulated AI response] This is a placeholder reply. \
Configure an API key and endpoint id in the settings to get real AI responses.";

    pub fn respond(prompt: &str) -> &'static str {
        let lower = prompt.to_lowercase();
        if lower.contains("collection") || prompt.contains("催款") {
            Self::COLLECTION
        } else if lower.contains("risk") || prompt.contains("风险") {
            Self::RISK
        } else {
            Self::DEFAULT
        }
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, prompt: &str) -> RvResult<String> {
        Ok(Self::respond(prompt).to_string())
    }
}

/// Caller-supplied provider credentials; blank values count as absent
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub api_key: Option<String>,
    pub endpoint_id: Option<String>,
}

impl ProviderCredentials {
    pub fn new(api_key: Option<String>, endpoint_id: Option<String>) -> Self {
        Self {
            api_key: non_blank(api_key),
            endpoint_id: non_blank(endpoint_id),
        }
    }

    /// Fill absent values from `fallback`
    pub fn or(self, fallback: ProviderCredentials) -> Self {
        Self {
            api_key: self.api_key.or(fallback.api_key),
            endpoint_id: self.endpoint_id.or(fallback.endpoint_id),
        }
    }

    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(config.api_key.clone(), config.endpoint_id.clone())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// The chat-completions provider when both credentials are present,
/// otherwise the canned responder
pub fn select_generator(
    client: Client,
    config: &AiConfig,
    credentials: ProviderCredentials,
) -> Arc<dyn TextGenerator> {
    match (credentials.api_key, credentials.endpoint_id) {
        (Some(api_key), Some(endpoint_id)) => Arc::new(ChatCompletionsGenerator::new(
            client,
            config.base_url.clone(),
            api_key,
            endpoint_id,
        )),
        (api_key, _) => {
            debug!(has_key = api_key.is_some(), "AI provider not configured, using canned responses");
            Arc::new(CannedGenerator)
        }
    }
}
