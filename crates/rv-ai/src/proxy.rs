//! Generator that goes through a Receivables server's `/ai/generate` route

use async_trait::async_trait;
use reqwest::Client;
use rv_core::error::RvError;
use rv_core::result::RvResult;
use serde::{Deserialize, Serialize};

use crate::generator::{ProviderCredentials, TextGenerator};

const SERVICE: &str = "ai-proxy";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone)]
pub struct ProxyGenerator {
    client: Client,
    base_url: String,
    credentials: ProviderCredentials,
}

impl ProxyGenerator {
    /// `base_url` is the API root, e.g. `http://localhost:3001/api`
    pub fn new(client: Client, base_url: impl Into<String>, credentials: ProviderCredentials) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn url(&self) -> String {
        format!("{}/ai/generate", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for ProxyGenerator {
    async fn generate(&self, prompt: &str) -> RvResult<String> {
        let body = GenerateRequest {
            prompt,
            api_key: self.credentials.api_key.as_deref(),
            endpoint_id: self.credentials.endpoint_id.as_deref(),
        };

        let response = self
            .client
            .post(self.url())
            .json(&body)
            .send()
            .await
            .map_err(|e| RvError::transport(SERVICE, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RvError::transport(SERVICE, format!("API Error: {}", status.as_u16())));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RvError::transport(SERVICE, format!("unreadable response: {}", e)))?;
        Ok(parsed.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_absent_credentials() {
        let body = GenerateRequest {
            prompt: "hi",
            api_key: None,
            endpoint_id: Some("ep-1"),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "prompt": "hi", "endpointId": "ep-1" }));
    }

    #[test]
    fn test_url() {
        let proxy = ProxyGenerator::new(Client::new(), "http://localhost:3001/api/", Default::default());
        assert_eq!(proxy.url(), "http://localhost:3001/api/ai/generate");
    }
}
