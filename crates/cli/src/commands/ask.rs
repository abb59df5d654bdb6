//! Ask command handler.
//!
//! Runs a single question through the same pipeline the HTTP endpoint uses
//! and prints the outcome.

use crate::commands::build_assistant;
use clap::Args;
use handbook_core::{config::AppConfig, AppError, AppResult};
use handbook_knowledge::{AskBody, AskRequest, AskResult};

/// Ask the handbook a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub query: Option<String>,

    /// Output the result as JSON ({ "status", "body" })
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let assistant = build_assistant(config)?;
        let request = AskRequest {
            query: self.query.clone(),
        };
        let result = assistant.ask(&request).await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", render_body(&result));
        }

        if result.is_success() {
            Ok(())
        } else {
            Err(AppError::Other(format!(
                "Request failed with status {}",
                result.status
            )))
        }
    }
}

fn render_body(result: &AskResult) -> &str {
    match &result.body {
        AskBody::Answer { answer } => answer,
        AskBody::Text(text) => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_body_prints_answer_or_text() {
        assert_eq!(render_body(&AskResult::answered("15 days.")), "15 days.");
        assert_eq!(
            render_body(&AskResult::rejected()),
            "Please pass a 'query' in the request body"
        );
        assert_eq!(
            render_body(&AskResult::completion_failed()),
            "Error generating answer."
        );
    }
}
