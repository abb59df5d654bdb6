//! Prompt system for the Handbook Assistant.
//!
//! This crate composes the grounded two-message prompt:
//! - Handlebars template rendering
//! - Knowledge context injection into the system instruction
//! - The user question as a `"Question: "` message

pub mod builder;
pub mod types;

// Re-export main types
pub use builder::{build_prompt, build_prompt_with_template};
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptTemplate};
