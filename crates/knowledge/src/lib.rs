//! Handbook knowledge retrieval and question answering.
//!
//! - [`retrieval`]: fetches the handbook from SharePoint and resolves the
//!   knowledge context through its fallback chain.
//! - [`rag`]: the ask pipeline that grounds a completion in that context.

pub mod rag;
pub mod retrieval;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use rag::{
    AskBody, AskRequest, AskResult, CompletionSettings, HandbookAssistant,
    COMPLETION_FAILED_MESSAGE, MISSING_QUERY_MESSAGE,
};
pub use retrieval::{
    resolve_context, ContextSource, DocumentFetcher, DocumentLocation, GraphDocumentFetcher,
    KnowledgeContext, FALLBACK_HANDBOOK_TEXT, RETRIEVAL_FAILED_TEXT,
};
