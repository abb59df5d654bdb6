//! Handbook retrieval from the document store.
//!
//! Provides the `DocumentFetcher` capability, its Microsoft Graph
//! implementation, and the fallback-chain resolver.

pub mod fetcher;
pub mod resolver;
pub mod types;

pub use fetcher::{DocumentFetcher, GraphDocumentFetcher};
pub use resolver::{resolve_context, FALLBACK_HANDBOOK_TEXT, RETRIEVAL_FAILED_TEXT};
pub use types::{ContextSource, DocumentLocation, KnowledgeContext};
