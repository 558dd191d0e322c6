//! Configuration management

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Timeout applied to inbound requests (seconds). Scan analysis runs in
    /// the background, so this only bounds the thin API surface.
    pub request_timeout_seconds: u64,
    /// Serve Swagger UI at /docs
    pub enable_docs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_seconds: 30,
            enable_docs: true,
        }
    }
}

/// Analysis backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Base URL of the Gemini API
    pub api_url: String,
    /// API key; also picked up from the GEMINI_API_KEY env var
    pub api_key: Option<String>,
    pub model: String,
    /// Per-call timeout (seconds). The backend can take tens of seconds for
    /// large targets.
    pub timeout_seconds: u64,
    /// Reasoning-token budget passed to the model
    pub thinking_budget: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
            model: "gemini-3-pro-preview".to_string(),
            timeout_seconds: 90,
            thinking_budget: 15_000,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter directive, e.g. "info" or "sentinel=debug,info"
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

/// Error raised by configuration validation
#[derive(Debug, thiserror::Error)]
#[error("Invalid configuration: {0}")]
pub struct ValidationError(String);

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Sources, lowest to highest priority: `config/default`, `config/{ENV}`,
    /// `config/local`, then environment variables with the `SENTINEL__`
    /// prefix and `__` separator (e.g. `SENTINEL__SERVER__PORT=3000`).
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("SENTINEL").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;

        // Common convention for the key, outside the SENTINEL__ namespace
        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            config.analysis.api_key = Some(api_key);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.server.request_timeout_seconds == 0 {
            return Err(ValidationError(
                "server.request_timeout_seconds must be > 0".into(),
            ));
        }
        if self.analysis.timeout_seconds == 0 {
            return Err(ValidationError("analysis.timeout_seconds must be > 0".into()));
        }
        if self.analysis.model.is_empty() {
            return Err(ValidationError("analysis.model must not be empty".into()));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ValidationError(format!(
                "logging.format must be 'pretty' or 'json', got '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
