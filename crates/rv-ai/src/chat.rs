//! OpenAI-compatible chat-completions provider

use async_trait::async_trait;
use reqwest::{header, Client};
use rv_core::error::RvError;
use rv_core::result::RvResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generator::TextGenerator;

const SERVICE: &str = "ai-provider";

pub const SYSTEM_PROMPT: &str = "You are a professional project management and finance assistant.";

#[derive(Clone)]
pub struct ChatCompletionsGenerator {
    http: Client,
    base_url: String,
    api_key: String,
    /// Model or endpoint id sent as `model`
    model: String,
}

impl ChatCompletionsGenerator {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsGenerator {
    async fn generate(&self, prompt: &str) -> RvResult<String> {
        let req = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            stream: false,
        };

        let resp = self
            .http
            .post(self.endpoint())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&req)
            .send()
            .await
            .map_err(|e| RvError::transport(SERVICE, e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| RvError::transport(SERVICE, format!("body read failed: {}", e)))?;
        if !status.is_success() {
            let snippet: String = body.chars().take(800).collect();
            debug!(status = status.as_u16(), body = %snippet, "AI provider rejected request");
            return Err(RvError::transport(SERVICE, format!("HTTP {}", status.as_u16())));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| RvError::transport(SERVICE, format!("unreadable response: {}", e)))?;
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .map(|m| m.content)
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessageOut>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatMessageOut {
    #[serde(default)]
    content: String,
}
