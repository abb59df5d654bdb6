//! Handbook Assistant Core Library
//!
//! This crate provides the foundational utilities shared by every other crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration snapshot (document store, completion service, server)

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, CompletionConfig, ServerConfig, SharePointConfig};
pub use error::{AppError, AppResult};
