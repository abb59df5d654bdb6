//! Error types for the Handbook Assistant.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application, including configuration, I/O, request validation,
//! LLM, knowledge retrieval and prompt errors.

use thiserror::Error;

/// Unified error type for the Handbook Assistant.
///
/// All fallible functions return `Result<T, AppError>`.
/// We never panic: errors are represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Inbound request validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// LLM provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Document store and retrieval errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_prefixes() {
        assert_eq!(
            AppError::Validation("missing query".to_string()).to_string(),
            "Validation error: missing query"
        );
        assert_eq!(
            AppError::Llm("timeout".to_string()).to_string(),
            "LLM error: timeout"
        );
        assert_eq!(AppError::Other("plain".to_string()).to_string(), "plain");
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Serialization(_)));
    }
}
