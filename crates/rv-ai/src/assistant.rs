//! AI assistant
//!
//! Wraps a [`TextGenerator`] in a [`RetryPolicy`] and turns provider
//! failures into readable text. Smart fill is the one operation that can
//! fail, because its output has to parse as a project draft.

use std::sync::Arc;

use rv_core::error::RvError;
use rv_core::result::RvResult;
use rv_models::{CreateProjectDto, Project};
use tracing::{debug, warn};

use crate::generator::TextGenerator;
use crate::prompts;
use crate::retry::RetryPolicy;

/// Prefix of the text returned once every attempt failed
pub const FAILURE_PREFIX: &str = "Failed to reach the AI service: ";

/// Text returned when the provider answered with nothing
pub const UNAVAILABLE_MESSAGE: &str = "The AI service is temporarily unavailable, please try again later.";

#[derive(Clone)]
pub struct AiAssistant {
    generator: Arc<dyn TextGenerator>,
    policy: RetryPolicy,
}

impl AiAssistant {
    pub fn new(generator: Arc<dyn TextGenerator>, policy: RetryPolicy) -> Self {
        Self { generator, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Generate text for `prompt`; never fails
    pub async fn generate(&self, prompt: &str) -> String {
        let generator = self.generator.clone();
        let result = self
            .policy
            .run(|attempt| {
                let generator = generator.clone();
                async move {
                    debug!(attempt = attempt + 1, "Calling AI provider");
                    generator.generate(prompt).await
                }
            })
            .await;

        match result {
            Ok(text) if text.trim().is_empty() => UNAVAILABLE_MESSAGE.to_string(),
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "AI retries exhausted");
                format!("{}{}", FAILURE_PREFIX, failure_detail(&e))
            }
        }
    }

    pub async fn collection_letter(&self, project: &Project) -> String {
        self.generate(&prompts::collection_letter(project)).await
    }

    pub async fn risk_summary(&self, project: &Project) -> String {
        self.generate(&prompts::risk_summary(project)).await
    }

    /// Extract a project draft from free text
    pub async fn smart_fill(&self, text: &str) -> RvResult<CreateProjectDto> {
        let response = self.generate(&prompts::smart_fill(text)).await;
        parse_draft(&response)
    }

    /// Smart fill that only fills the fields `draft` leaves blank
    pub async fn fill_draft(&self, draft: &mut CreateProjectDto, text: &str) -> RvResult<()> {
        let extracted = self.smart_fill(text).await?;
        draft.merge_missing(extracted);
        Ok(())
    }
}

fn failure_detail(error: &RvError) -> String {
    match error {
        RvError::Transport { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// Parse model output as a draft, tolerating markdown code fences
pub fn parse_draft(response: &str) -> RvResult<CreateProjectDto> {
    let cleaned = response.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();
    serde_json::from_str(cleaned)
        .map_err(|e| RvError::format(format!("AI response is not a project object: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::time::Duration;
    use tokio::time::Instant;

    use crate::generator::MockTextGenerator;

    fn down() -> RvError {
        RvError::transport("ai-provider", "HTTP 503")
    }

    fn assistant(mock: MockTextGenerator) -> AiAssistant {
        AiAssistant::new(Arc::new(mock), RetryPolicy::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_retries_then_succeeds() {
        let mut mock = MockTextGenerator::new();
        let mut calls = 0;
        mock.expect_generate().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(down())
            } else {
                Ok("Dear client".to_string())
            }
        });

        let start = Instant::now();
        assert_eq!(assistant(mock).generate("hi").await, "Dear client");
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_become_text() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(3).returning(|_| Err(down()));

        let text = assistant(mock).generate("hi").await;
        assert_eq!(text, "Failed to reach the AI service: HTTP 503");
    }

    #[tokio::test]
    async fn test_empty_text_is_unavailable() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(1).returning(|_| Ok("  ".to_string()));

        assert_eq!(assistant(mock).generate("hi").await, UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_collection_letter_uses_project_prompt() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(|prompt| prompt.contains("Office fit-out") && prompt.contains("collection"))
            .returning(|_| Ok("letter".to_string()));

        let project = Project::new(3, "Office fit-out", Decimal::from(80));
        assert_eq!(assistant(mock).collection_letter(&project).await, "letter");
    }

    #[tokio::test]
    async fn test_smart_fill_parses_fenced_json() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().returning(|_| {
            Ok("```json\n{\"name\": \"Data platform\", \"entity\": \"Acme\", \"amount\": 120, \"paymentDate\": \"2024-09-30\", \"signDate\": \"\"}\n```".to_string())
        });

        let draft = assistant(mock).smart_fill("Acme signed the data platform deal").await.unwrap();
        assert_eq!(draft.name, "Data platform");
        assert_eq!(draft.amount, Some(Decimal::from(120)));
        assert_eq!(draft.payment_date, NaiveDate::from_ymd_opt(2024, 9, 30));
        assert_eq!(draft.sign_date, None);
    }

    #[tokio::test]
    async fn test_fill_draft_keeps_user_input() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .returning(|_| Ok(r#"{"name": "Extracted", "manager": "Li", "amount": 50}"#.to_string()));

        let mut draft = CreateProjectDto::new("Typed by user", Decimal::from(70));
        assistant(mock).fill_draft(&mut draft, "text").await.unwrap();
        assert_eq!(draft.name, "Typed by user");
        assert_eq!(draft.manager, "Li");
        assert_eq!(draft.amount, Some(Decimal::from(70)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_smart_fill_failure_is_format_error() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().returning(|_| Err(down()));

        let err = assistant(mock).smart_fill("text").await.unwrap_err();
        assert!(matches!(err, RvError::Format(_)));
    }
}
