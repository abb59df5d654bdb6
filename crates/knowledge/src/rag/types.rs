//! Ask request and result types.

use serde::{Deserialize, Serialize};

/// Body text returned when the request carries no usable query.
pub const MISSING_QUERY_MESSAGE: &str = "Please pass a 'query' in the request body";

/// Body text returned when the completion step fails.
pub const COMPLETION_FAILED_MESSAGE: &str = "Error generating answer.";

/// Inbound request payload: `{ "query": string }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub query: Option<String>,
}

impl AskRequest {
    /// Create a request carrying `query`.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
        }
    }

    /// Parse a raw request body.
    ///
    /// Anything that is not a JSON object with a string `query` (empty body,
    /// malformed JSON, `null`, a number) becomes a request without a query.
    pub fn from_json_slice(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_else(|e| {
            tracing::debug!("Request body is not a usable ask payload: {}", e);
            Self::default()
        })
    }
}

/// Response body: either a JSON answer object or a plain-text reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AskBody {
    Answer { answer: String },
    Text(String),
}

/// Terminal result of one ask request: an HTTP status plus body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskResult {
    pub status: u16,
    pub body: AskBody,
}

impl AskResult {
    /// 200 with `{ "answer": ... }`.
    pub fn answered(answer: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: AskBody::Answer {
                answer: answer.into(),
            },
        }
    }

    /// 400 for a missing or empty query.
    pub fn rejected() -> Self {
        Self {
            status: 400,
            body: AskBody::Text(MISSING_QUERY_MESSAGE.to_string()),
        }
    }

    /// 500 for a failed completion.
    pub fn completion_failed() -> Self {
        Self {
            status: 500,
            body: AskBody::Text(COMPLETION_FAILED_MESSAGE.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// The answer text, when the request was answered.
    pub fn answer(&self) -> Option<&str> {
        match &self.body {
            AskBody::Answer { answer } => Some(answer),
            AskBody::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_body() {
        let request = AskRequest::from_json_slice(br#"{"query": "How many vacation days?"}"#);
        assert_eq!(request.query.as_deref(), Some("How many vacation days?"));
    }

    #[test]
    fn test_unusable_bodies_have_no_query() {
        let bodies: [&[u8]; 6] = [
            b"",
            b"{}",
            br#"{"query": null}"#,
            br#"{"query": 42}"#,
            b"not json",
            br#""just a string""#,
        ];

        for body in bodies {
            let request = AskRequest::from_json_slice(body);
            assert!(request.query.is_none(), "body {:?}", String::from_utf8_lossy(body));
        }
    }

    #[test]
    fn test_result_shapes() {
        let ok = AskResult::answered("15 days.");
        assert!(ok.is_success());
        assert_eq!(ok.answer(), Some("15 days."));
        assert_eq!(
            serde_json::to_value(&ok.body).unwrap(),
            serde_json::json!({ "answer": "15 days." })
        );

        let rejected = AskResult::rejected();
        assert_eq!(rejected.status, 400);
        assert_eq!(
            rejected.body,
            AskBody::Text("Please pass a 'query' in the request body".to_string())
        );

        let failed = AskResult::completion_failed();
        assert_eq!(failed.status, 500);
        assert_eq!(
            serde_json::to_value(&failed.body).unwrap(),
            serde_json::json!("Error generating answer.")
        );
    }
}
