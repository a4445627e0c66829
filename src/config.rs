//! Startup configuration read from the process environment.

use thiserror::Error;
use url::Url;

use crate::llm::openai::DEFAULT_OPENAI_BASE_URL;
use crate::llm::{CompletionError, OpenAiClient};
use crate::optimizer::DEFAULT_MODEL;

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable holding the listening port.
pub const PORT_ENV: &str = "PORT";
/// Environment variable holding the upstream API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding the upstream API root.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
/// Environment variable overriding the model used when requests omit one.
pub const MODEL_ENV: &str = "OPTIMIZER_MODEL";

/// Configuration errors detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key configured.
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    /// Base URL is not an absolute URL.
    #[error("invalid OPENAI_BASE_URL '{value}': {source}")]
    InvalidBaseUrl {
        /// Offending value.
        value: String,
        /// Parse failure.
        source: url::ParseError,
    },

    /// HTTP client could not be constructed.
    #[error("failed to build completion client: {0}")]
    ClientBuild(#[from] CompletionError),
}

/// Process-wide settings, loaded once.
#[derive(Clone)]
pub struct AppConfig {
    /// Listening port.
    pub port: u16,
    /// Upstream API key.
    pub openai_api_key: String,
    /// Upstream API root.
    pub openai_base_url: String,
    /// Model used when requests omit one.
    pub default_model: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("openai_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("default_model", &self.default_model)
            .finish()
    }
}

impl AppConfig {
    /// Load from the process environment.
    ///
    /// # Errors
    /// Returns an error if the API key is missing or the base URL is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns an error if the API key is missing or the base URL is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(PORT_ENV) {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid {PORT_ENV} '{raw}', using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
        };

        let openai_api_key = lookup(API_KEY_ENV)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let openai_base_url = match lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            None => DEFAULT_OPENAI_BASE_URL.to_string(),
            Some(value) => {
                let value = value.trim().to_string();
                if let Err(source) = Url::parse(&value) {
                    return Err(ConfigError::InvalidBaseUrl { value, source });
                }
                value
            }
        };

        let default_model = lookup(MODEL_ENV)
            .map(|model| model.trim().to_string())
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            port,
            openai_api_key,
            openai_base_url,
            default_model,
        })
    }

    /// Build the completion client described by this configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn openai_client(&self) -> Result<OpenAiClient, ConfigError> {
        let client = OpenAiClient::new(self.openai_api_key.clone())?
            .with_base_url(self.openai_base_url.clone());
        Ok(client)
    }
}
