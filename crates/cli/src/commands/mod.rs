//! Command handlers for the handbook CLI.

pub mod ask;
pub mod serve;

pub use ask::AskCommand;
pub use serve::ServeCommand;

use handbook_core::{config::AppConfig, AppError, AppResult};
use handbook_knowledge::{CompletionSettings, GraphDocumentFetcher, HandbookAssistant};
use handbook_llm::create_client;
use std::sync::Arc;
use std::time::Duration;

/// Wire the production collaborators into an assistant.
pub fn build_assistant(config: &AppConfig) -> AppResult<HandbookAssistant> {
    let completion = &config.completion;

    let client = create_client(
        &completion.provider,
        completion.endpoint.as_deref(),
        completion.api_key.as_deref(),
        Some(Duration::from_secs(completion.timeout_secs)),
    )
    .map_err(AppError::Config)?;

    let fetcher = GraphDocumentFetcher::from_config(&config.sharepoint);

    tracing::debug!(
        "Assistant uses provider {} with model {}",
        client.provider_name(),
        completion.model
    );

    Ok(HandbookAssistant::new(
        config.sharepoint.clone(),
        CompletionSettings::from_config(completion),
        Arc::new(fetcher),
        client,
    ))
}
