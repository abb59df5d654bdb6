//! Configuration management for the Handbook Assistant.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - An optional YAML config file (`HANDBOOK_CONFIG` or `--config`)
//! - Environment variables
//! - Command-line flags
//!
//! The resulting [`AppConfig`] is the read-only snapshot handed to the request
//! pipeline at construction time; nothing downstream reads the environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default Microsoft Graph API root used to address the handbook document.
pub const DEFAULT_GRAPH_ENDPOINT: &str = "https://graph.microsoft.com/v1.0";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Maximum tokens requested from the completion service.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Low temperature keeps policy answers factual.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Completion providers understood by the LLM factory.
pub const KNOWN_PROVIDERS: [&str; 2] = ["openai", "ollama"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Document store (SharePoint via Microsoft Graph) settings
    pub sharepoint: SharePointConfig,

    /// Completion service settings
    pub completion: CompletionConfig,

    /// HTTP host settings
    pub server: ServerConfig,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Emit logs as JSON lines
    pub json_logs: bool,
}

/// Document store settings.
///
/// Absence of any of `site_id`, `doc_id` or `access_token` is not an error;
/// it selects the fallback handbook text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SharePointConfig {
    /// Skip retrieval entirely
    pub disabled: bool,

    /// SharePoint site identifier
    #[serde(rename = "siteId")]
    pub site_id: Option<String>,

    /// Drive item identifier of the handbook document
    #[serde(rename = "docId")]
    pub doc_id: Option<String>,

    /// Bearer token for Microsoft Graph
    #[serde(rename = "accessToken", skip_serializing)]
    pub access_token: Option<String>,

    /// Graph API root
    #[serde(rename = "graphEndpoint")]
    pub graph_endpoint: String,

    /// Per-call timeout in seconds
    #[serde(rename = "timeoutSecs")]
    pub timeout_secs: u64,
}

impl Default for SharePointConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            site_id: None,
            doc_id: None,
            access_token: None,
            graph_endpoint: DEFAULT_GRAPH_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Completion service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Provider name ("openai", "ollama")
    pub provider: String,

    /// API key for the completion service
    #[serde(rename = "apiKey", skip_serializing)]
    pub api_key: Option<String>,

    /// Model identifier
    pub model: String,

    /// Maximum tokens to generate. Fixed; never read from a config file.
    #[serde(rename = "maxTokens", skip_deserializing, default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature. Fixed; never read from a config file.
    #[serde(skip_deserializing, default = "default_temperature")]
    pub temperature: f32,

    /// Custom provider base URL
    pub endpoint: Option<String>,

    /// Per-call timeout in seconds
    #[serde(rename = "timeoutSecs")]
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            endpoint: None,
            timeout_secs: 60,
        }
    }
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

/// HTTP host settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:7071".to_string(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    sharepoint: Option<SharePointConfig>,
    completion: Option<CompletionConfig>,
    server: Option<ServerConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
    json: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            sharepoint: SharePointConfig::default(),
            completion: CompletionConfig::default(),
            server: ServerConfig::default(),
            log_level: None,
            verbose: false,
            no_color: false,
            json_logs: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment and defaults.
    ///
    /// Environment variables:
    /// - `HANDBOOK_CONFIG`: Path to a YAML config file
    /// - `DISABLE_SHAREPOINT`: `true` skips document retrieval
    /// - `SHAREPOINT_SITE_ID`, `SHAREPOINT_DOC_ID`: Handbook document address
    /// - `GRAPH_ACCESS_TOKEN`: Bearer token for Microsoft Graph
    /// - `GRAPH_ENDPOINT`: Graph API root override
    /// - `OPENAI_API_KEY`: Completion service API key
    /// - `HANDBOOK_PROVIDER`, `HANDBOOK_MODEL`, `HANDBOOK_COMPLETION_ENDPOINT`
    /// - `HANDBOOK_BIND`: HTTP bind address
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use handbook_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Model: {}", config.completion.model);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`AppConfig::load`], with an explicit config file taking the
    /// place of `HANDBOOK_CONFIG`.
    pub fn load_with_config_file(config_file: Option<&Path>) -> AppResult<Self> {
        match config_file {
            Some(path) => {
                let path = path.to_string_lossy().to_string();
                Self::from_lookup(|key| {
                    if key == "HANDBOOK_CONFIG" {
                        Some(path.clone())
                    } else {
                        std::env::var(key).ok()
                    }
                })
            }
            None => Self::load(),
        }
    }

    /// Load configuration using an arbitrary key lookup in place of the
    /// process environment. Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let mut config = Self {
            config_file: get("HANDBOOK_CONFIG").map(PathBuf::from),
            ..Self::default()
        };

        if let Some(path) = config.config_file.clone() {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "Config file does not exist: {:?}",
                    path
                )));
            }
            config = config.merge_yaml(&path)?;
        }

        // Environment variables override YAML config
        if let Some(flag) = get("DISABLE_SHAREPOINT") {
            config.sharepoint.disabled = flag == "true";
        }

        if let Some(site_id) = get("SHAREPOINT_SITE_ID") {
            config.sharepoint.site_id = Some(site_id);
        }

        if let Some(doc_id) = get("SHAREPOINT_DOC_ID") {
            config.sharepoint.doc_id = Some(doc_id);
        }

        if let Some(token) = get("GRAPH_ACCESS_TOKEN") {
            config.sharepoint.access_token = Some(token);
        }

        if let Some(endpoint) = get("GRAPH_ENDPOINT") {
            config.sharepoint.graph_endpoint = endpoint;
        }

        if let Some(api_key) = get("OPENAI_API_KEY") {
            config.completion.api_key = Some(api_key);
        }

        if let Some(provider) = get("HANDBOOK_PROVIDER") {
            config.completion.provider = provider;
        }

        if let Some(model) = get("HANDBOOK_MODEL") {
            config.completion.model = model;
        }

        if let Some(endpoint) = get("HANDBOOK_COMPLETION_ENDPOINT") {
            config.completion.endpoint = Some(endpoint);
        }

        if let Some(bind) = get("HANDBOOK_BIND") {
            config.server.bind = bind;
        }

        if let Some(level) = get("RUST_LOG") {
            config.log_level = Some(level);
        }

        if lookup("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(sharepoint) = config_file.sharepoint {
            result.sharepoint = SharePointConfig {
                site_id: non_empty(sharepoint.site_id),
                doc_id: non_empty(sharepoint.doc_id),
                access_token: non_empty(sharepoint.access_token),
                ..sharepoint
            };
        }

        if let Some(completion) = config_file.completion {
            result.completion = CompletionConfig {
                api_key: non_empty(completion.api_key),
                endpoint: non_empty(completion.endpoint),
                ..completion
            };
        }

        if let Some(server) = config_file.server {
            result.server = server;
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
            if let Some(json) = logging.json {
                result.json_logs = json;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        provider: Option<String>,
        model: Option<String>,
        bind: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
        json_logs: bool,
    ) -> Self {
        if let Some(provider) = provider {
            self.completion.provider = provider;
        }

        if let Some(model) = model {
            self.completion.model = model;
        }

        if let Some(bind) = bind {
            self.server.bind = bind;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        if json_logs {
            self.json_logs = true;
        }

        self
    }

    /// Validate configuration for the active completion provider.
    ///
    /// A missing OpenAI API key is not fatal here: requests will fail at
    /// completion time and be answered with the error result.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.completion.provider.to_lowercase();

        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.completion.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if !(0.0..=2.0).contains(&self.completion.temperature) {
            return Err(AppError::Config(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.completion.temperature
            )));
        }

        if provider == "openai" && self.completion.api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; completion requests will fail");
        }

        if !self.sharepoint.disabled && !self.sharepoint.is_configured() {
            tracing::info!(
                "SharePoint site, document or access token not configured; fallback handbook text will be used"
            );
        }

        Ok(())
    }
}

/// Empty strings from a config file mean "not set", as they do in the environment.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl SharePointConfig {
    /// Whether every identifier needed to fetch the document is present.
    pub fn is_configured(&self) -> bool {
        self.site_id.is_some() && self.doc_id.is_some() && self.access_token.is_some()
    }
}
