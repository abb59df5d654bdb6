//! Document fetcher trait and the Microsoft Graph implementation.

use crate::retrieval::types::DocumentLocation;
use handbook_core::{AppError, AppResult, SharePointConfig};
use std::time::Duration;

/// Trait for document-store collaborators.
///
/// One call fetches the raw text of one document; implementations never retry.
#[async_trait::async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the document body as text, authenticated with `access_token`.
    async fn fetch_document(
        &self,
        location: &DocumentLocation,
        access_token: &str,
    ) -> AppResult<String>;
}

/// Fetches drive item content through the Microsoft Graph API.
///
/// `GET {base_url}/sites/{site_id}/drive/items/{doc_id}/content`
#[derive(Debug, Clone)]
pub struct GraphDocumentFetcher {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GraphDocumentFetcher {
    /// Create a fetcher against a Graph API root.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    /// Create a fetcher from the SharePoint configuration.
    pub fn from_config(config: &SharePointConfig) -> Self {
        Self::new(
            config.graph_endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn content_url(&self, location: &DocumentLocation) -> String {
        format!(
            "{}/sites/{}/drive/items/{}/content",
            self.base_url, location.site_id, location.doc_id
        )
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for GraphDocumentFetcher {
    async fn fetch_document(
        &self,
        location: &DocumentLocation,
        access_token: &str,
    ) -> AppResult<String> {
        let url = self.content_url(location);
        tracing::debug!("Fetching handbook from {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::Knowledge(format!("Graph request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Knowledge(format!(
                "Graph API returned {} for document {}",
                status, location.doc_id
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::Knowledge(format!("Failed to read document body: {}", e)))?;

        tracing::debug!("Fetched {} bytes of handbook text", text.len());
        Ok(text)
    }
}
