//! Knowledge context resolution.
//!
//! Produces the context string through the fallback chain. Retrieval is
//! best-effort: every branch yields a context, none fails the request.

use crate::retrieval::fetcher::DocumentFetcher;
use crate::retrieval::types::{ContextSource, DocumentLocation, KnowledgeContext};
use handbook_core::SharePointConfig;

/// Context used when retrieval is disabled or not configured.
pub const FALLBACK_HANDBOOK_TEXT: &str =
    "Fallback handbook content: Insert your handbook content here for testing purposes.";

/// Context used when the document fetch fails.
pub const RETRIEVAL_FAILED_TEXT: &str =
    "Could not retrieve handbook from SharePoint. Please ensure the document is available.";

/// Resolve the knowledge context. First matching branch wins:
///
/// 1. Retrieval disabled → fallback text.
/// 2. Site, document or token missing → fallback text.
/// 3. One fetch attempt: the exact document text, or the retrieval-failed
///    text when the fetch errors.
pub async fn resolve_context(
    config: &SharePointConfig,
    fetcher: &dyn DocumentFetcher,
) -> KnowledgeContext {
    if config.disabled {
        tracing::info!("SharePoint integration is disabled. Using fallback handbook text.");
        return KnowledgeContext::new(FALLBACK_HANDBOOK_TEXT, ContextSource::Disabled);
    }

    let (site_id, doc_id, access_token) = match (
        config.site_id.as_deref(),
        config.doc_id.as_deref(),
        config.access_token.as_deref(),
    ) {
        (Some(site_id), Some(doc_id), Some(token)) => (site_id, doc_id, token),
        _ => {
            tracing::info!(
                "SharePoint integration is not configured. Using fallback handbook text."
            );
            return KnowledgeContext::new(FALLBACK_HANDBOOK_TEXT, ContextSource::Unconfigured);
        }
    };

    let location = DocumentLocation::new(site_id, doc_id);
    match fetcher.fetch_document(&location, access_token).await {
        Ok(text) => {
            tracing::info!("Retrieved handbook from SharePoint ({} bytes)", text.len());
            KnowledgeContext::new(text, ContextSource::Document)
        }
        Err(e) => {
            tracing::error!("Error fetching handbook from SharePoint: {}", e);
            KnowledgeContext::new(RETRIEVAL_FAILED_TEXT, ContextSource::RetrievalFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fakes::{FailingFetcher, StaticFetcher};

    fn configured() -> SharePointConfig {
        SharePointConfig {
            site_id: Some("site-1".to_string()),
            doc_id: Some("doc-1".to_string()),
            access_token: Some("token-1".to_string()),
            ..SharePointConfig::default()
        }
    }

    #[tokio::test]
    async fn test_disabled_wins_over_full_config() {
        let config = SharePointConfig {
            disabled: true,
            ..configured()
        };
        let fetcher = StaticFetcher::new("should not be read");

        let context = resolve_context(&config, &fetcher).await;

        assert_eq!(context.text, FALLBACK_HANDBOOK_TEXT);
        assert_eq!(context.source, ContextSource::Disabled);
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_each_missing_setting_selects_fallback() {
        let variants = [
            SharePointConfig {
                site_id: None,
                ..configured()
            },
            SharePointConfig {
                doc_id: None,
                ..configured()
            },
            SharePointConfig {
                access_token: None,
                ..configured()
            },
        ];

        for config in variants {
            let fetcher = StaticFetcher::new("unused");
            let context = resolve_context(&config, &fetcher).await;

            assert_eq!(context.text, FALLBACK_HANDBOOK_TEXT);
            assert_eq!(context.source, ContextSource::Unconfigured);
            assert_eq!(fetcher.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_fetched_text_is_used_verbatim() {
        let raw = "  Vacation: 15 days per year.\n\nSick leave: 10 days.\n  ";
        let fetcher = StaticFetcher::new(raw);

        let context = resolve_context(&configured(), &fetcher).await;

        assert_eq!(context.text, raw);
        assert!(context.is_document());
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(
            fetcher.last_request(),
            Some((DocumentLocation::new("site-1", "doc-1"), "token-1".to_string()))
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_is_recovered_once() {
        let fetcher = FailingFetcher::new("connection refused");

        let context = resolve_context(&configured(), &fetcher).await;

        assert_eq!(context.text, RETRIEVAL_FAILED_TEXT);
        assert_eq!(context.source, ContextSource::RetrievalFailed);
        assert_eq!(fetcher.calls(), 1);
    }

    #[test]
    fn test_fallback_strings_are_distinct() {
        assert_ne!(FALLBACK_HANDBOOK_TEXT, RETRIEVAL_FAILED_TEXT);
    }
}
