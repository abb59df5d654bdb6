//! Deterministic collaborators that record how they were called.

use crate::retrieval::{DocumentFetcher, DocumentLocation};
use handbook_core::{AppError, AppResult};
use handbook_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use std::sync::Mutex;

/// Returns the same document text for every fetch.
pub struct StaticFetcher {
    text: String,
    requests: Mutex<Vec<(DocumentLocation, String)>>,
}

impl StaticFetcher {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<(DocumentLocation, String)> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for StaticFetcher {
    async fn fetch_document(
        &self,
        location: &DocumentLocation,
        access_token: &str,
    ) -> AppResult<String> {
        self.requests
            .lock()
            .unwrap()
            .push((location.clone(), access_token.to_string()));
        Ok(self.text.clone())
    }
}

/// Fails every fetch, as an unreachable document store would.
pub struct FailingFetcher {
    message: String,
    calls: Mutex<usize>,
}

impl FailingFetcher {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for FailingFetcher {
    async fn fetch_document(
        &self,
        _location: &DocumentLocation,
        _access_token: &str,
    ) -> AppResult<String> {
        *self.calls.lock().unwrap() += 1;
        Err(AppError::Knowledge(self.message.clone()))
    }
}

/// Completion client with a canned reply that records every request.
pub struct FakeLlmClient {
    reply: Result<String, String>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl FakeLlmClient {
    pub fn answering(content: impl Into<String>) -> Self {
        Self {
            reply: Ok(content.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for FakeLlmClient {
    fn provider_name(&self) -> &str {
        "fake"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.requests.lock().unwrap().push(request.clone());

        match &self.reply {
            Ok(content) => Ok(LlmResponse {
                content: content.clone(),
                model: request.model.clone(),
                usage: LlmUsage::new(10, 3),
            }),
            Err(message) => Err(AppError::Llm(message.clone())),
        }
    }
}
