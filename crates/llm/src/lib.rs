//! LLM integration crate for the Handbook Assistant.
//!
//! This crate provides a provider-agnostic abstraction for chat completions.
//!
//! # Providers
//! - **OpenAI**: Chat Completions API (default)
//! - **Ollama**: Local LLM runtime
//!
//! # Example
//! ```no_run
//! use handbook_llm::{ChatMessage, LlmClient, LlmRequest, providers::OpenAiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new(Some("sk-...".to_string()));
//! let request = LlmRequest::new("gpt-3.5-turbo", vec![ChatMessage::user("Hello")]);
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{ChatMessage, ChatRole, LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{OllamaClient, OpenAiClient};
