//! Handbook question answering.
//!
//! Runs one request through validation, context resolution, prompt
//! composition and a single completion call, then maps the outcome to an
//! [`AskResult`]. Each stage runs strictly after the previous one.

use crate::rag::types::{AskRequest, AskResult};
use crate::retrieval::{resolve_context, DocumentFetcher};
use handbook_core::{AppError, AppResult, CompletionConfig, SharePointConfig};
use handbook_llm::{LlmClient, LlmRequest};
use handbook_prompt::{build_prompt, BuiltPrompt};
use std::sync::Arc;

/// Fixed parameters sent with every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionSettings {
    pub fn from_config(config: &CompletionConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self::from_config(&CompletionConfig::default())
    }
}

/// Answers handbook questions.
///
/// Holds the configuration snapshot and both collaborators; no state is
/// carried between requests, so one instance serves all of them.
pub struct HandbookAssistant {
    retrieval: SharePointConfig,
    settings: CompletionSettings,
    fetcher: Arc<dyn DocumentFetcher>,
    client: Arc<dyn LlmClient>,
}

impl HandbookAssistant {
    pub fn new(
        retrieval: SharePointConfig,
        settings: CompletionSettings,
        fetcher: Arc<dyn DocumentFetcher>,
        client: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            retrieval,
            settings,
            fetcher,
            client,
        }
    }

    /// Answer one request. Always returns exactly one result:
    /// 400 for a missing query, 200 with the answer, or 500 when the
    /// completion fails.
    pub async fn ask(&self, request: &AskRequest) -> AskResult {
        tracing::info!("Processing handbook question");

        let query = match validate_query(request) {
            Ok(query) => query,
            Err(e) => {
                tracing::info!("Rejecting request: {}", e);
                return AskResult::rejected();
            }
        };

        let context = resolve_context(&self.retrieval, self.fetcher.as_ref()).await;
        tracing::debug!("Knowledge context source: {:?}", context.source);

        let prompt = match build_prompt(&context.text, query) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::error!("Failed to build prompt: {}", e);
                return AskResult::completion_failed();
            }
        };

        match invoke_completion(self.client.as_ref(), &prompt, &self.settings).await {
            Ok(answer) => AskResult::answered(answer),
            Err(_) => AskResult::completion_failed(),
        }
    }
}

/// Return the query when it is present and non-empty.
pub fn validate_query(request: &AskRequest) -> AppResult<&str> {
    match request.query.as_deref() {
        Some(query) if !query.is_empty() => Ok(query),
        _ => Err(AppError::Validation(
            "request body has no non-empty 'query'".to_string(),
        )),
    }
}

/// Send the prompt once and return the first choice's text, trimmed.
///
/// Failures are logged here and returned; there is no retry and no
/// synthesized fallback answer.
pub async fn invoke_completion(
    client: &dyn LlmClient,
    prompt: &BuiltPrompt,
    settings: &CompletionSettings,
) -> AppResult<String> {
    let request = LlmRequest::new(settings.model.clone(), prompt.messages())
        .with_max_tokens(settings.max_tokens)
        .with_temperature(settings.temperature);

    tracing::debug!(
        "Requesting completion from {} (model: {})",
        client.provider_name(),
        settings.model
    );

    let response = client.complete(&request).await.map_err(|e| {
        tracing::error!("Error calling completion service: {}", e);
        e
    })?;

    tracing::debug!(
        "Token usage - Prompt: {}, Completion: {}, Total: {}",
        response.usage.prompt_tokens,
        response.usage.completion_tokens,
        response.usage.total_tokens
    );

    Ok(response.content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fakes::FakeLlmClient;
    use handbook_llm::ChatRole;

    #[test]
    fn test_validate_query() {
        assert_eq!(validate_query(&AskRequest::new("hi")).unwrap(), "hi");
        assert!(matches!(
            validate_query(&AskRequest::new("")),
            Err(AppError::Validation(_))
        ));
        assert!(validate_query(&AskRequest::default()).is_err());
    }

    #[test]
    fn test_validate_passes_query_unchanged() {
        let request = AskRequest::new("  spaced  ");
        assert_eq!(validate_query(&request).unwrap(), "  spaced  ");
    }

    #[test]
    fn test_default_settings() {
        let settings = CompletionSettings::default();
        assert_eq!(settings.model, "gpt-3.5-turbo");
        assert_eq!(settings.max_tokens, 150);
        assert_eq!(settings.temperature, 0.2);
    }

    #[tokio::test]
    async fn test_invoke_completion_trims_and_sends_fixed_parameters() {
        let client = FakeLlmClient::answering("\n  15 days.  \n");
        let prompt = build_prompt("ctx", "How many vacation days?").unwrap();

        let answer = invoke_completion(&client, &prompt, &CompletionSettings::default())
            .await
            .unwrap();

        assert_eq!(answer, "15 days.");

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        let sent = &requests[0];
        assert_eq!(sent.model, "gpt-3.5-turbo");
        assert_eq!(sent.max_tokens, Some(150));
        assert_eq!(sent.temperature, Some(0.2));
        assert_eq!(sent.messages[0].role, ChatRole::System);
        assert_eq!(sent.messages[1].role, ChatRole::User);
    }

    #[tokio::test]
    async fn test_invoke_completion_failure_is_not_retried() {
        let client = FakeLlmClient::failing("503 Service Unavailable");
        let prompt = build_prompt("ctx", "q").unwrap();

        let result = invoke_completion(&client, &prompt, &CompletionSettings::default()).await;

        assert!(matches!(result, Err(AppError::Llm(_))));
        assert_eq!(client.requests().len(), 1);
    }
}
