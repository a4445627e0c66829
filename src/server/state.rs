//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::config::{AppConfig, ConfigError};
use crate::optimizer::PromptDispatcher;

/// Shared application state.
pub struct AppState {
    /// Dispatcher holding the injected completion provider.
    pub dispatcher: PromptDispatcher,
}

impl AppState {
    /// Wrap an already-built dispatcher.
    #[must_use]
    pub fn new(dispatcher: PromptDispatcher) -> Arc<Self> {
        Arc::new(Self { dispatcher })
    }

    /// Build state with an OpenAI client from configuration.
    ///
    /// # Errors
    /// Returns an error if the completion client cannot be created.
    pub fn from_config(config: &AppConfig) -> Result<Arc<Self>, ConfigError> {
        let client = config.openai_client()?;
        tracing::info!("Completion endpoint: {}", client.base_url());
        let dispatcher =
            PromptDispatcher::new(Arc::new(client)).with_default_model(&config.default_model);
        tracing::info!("Default model: {}", dispatcher.default_model());
        Ok(Self::new(dispatcher))
    }
}
