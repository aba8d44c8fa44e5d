//! Shared application state.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::llm::{LlmClient, LlmConfig};

/// State shared across all connections.
///
/// The `LlmClient` is constructed once at startup and handed to every
/// session; it holds only network and auth configuration and is never
/// mutated after construction.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub llm: Arc<LlmClient>,
}

impl AppState {
    /// Create application state from server configuration.
    pub fn new(config: ServerConfig) -> Self {
        let mut llm_config = LlmConfig {
            api_key: config.groq_api_key.clone().unwrap_or_default(),
            ..Default::default()
        };
        if let Some(model) = &config.groq_model {
            llm_config.model = model.clone();
        }
        if let Some(base_url) = &config.groq_api_base {
            llm_config.base_url = base_url.clone();
        }

        Self {
            config,
            llm: Arc::new(LlmClient::new(llm_config)),
        }
    }
}
