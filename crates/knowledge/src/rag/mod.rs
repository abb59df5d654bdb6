//! Retrieval-augmented answering over the employee handbook.

pub mod ask;
pub mod types;

pub use ask::{invoke_completion, validate_query, CompletionSettings, HandbookAssistant};
pub use types::{AskBody, AskRequest, AskResult, COMPLETION_FAILED_MESSAGE, MISSING_QUERY_MESSAGE};
