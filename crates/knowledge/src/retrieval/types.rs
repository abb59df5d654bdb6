//! Knowledge context types.

use serde::{Deserialize, Serialize};

/// Where a resolved knowledge context came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSource {
    /// Retrieval switched off by configuration
    Disabled,
    /// Site, document or token missing
    Unconfigured,
    /// Fetched handbook text
    Document,
    /// Fetch attempted and failed
    RetrievalFailed,
}

/// The text block injected into the system instruction.
///
/// `text` is always defined; when retrieval is unavailable it holds one of
/// the fixed fallback strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeContext {
    pub text: String,
    pub source: ContextSource,
}

impl KnowledgeContext {
    pub fn new(text: impl Into<String>, source: ContextSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    /// Whether the text is the fetched document rather than a fallback.
    pub fn is_document(&self) -> bool {
        self.source == ContextSource::Document
    }
}

/// Address of the handbook document in SharePoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    pub site_id: String,
    pub doc_id: String,
}

impl DocumentLocation {
    pub fn new(site_id: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            doc_id: doc_id.into(),
        }
    }
}
