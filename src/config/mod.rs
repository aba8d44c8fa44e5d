//! Configuration module for the gateway.
//!
//! Configuration comes from environment variables, optionally seeded from a
//! `.env` file (`.env.development` when `NODE_ENV=development`). CLI flags
//! may override individual fields after loading.

use std::env;

use thiserror::Error;
use tracing::warn;

/// Default port when `PORT` is not set.
const DEFAULT_PORT: u16 = 8080;

/// Default bind host when `HOST` is not set.
const DEFAULT_HOST: &str = "0.0.0.0";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was present but not parseable
    #[error("Invalid value for {variable}: {message}")]
    InvalidValue { variable: String, message: String },
}

/// Server configuration
///
/// Contains everything needed to run the gateway:
/// - Bind address (host, port)
/// - Groq API key and optional model override
/// - Retell API key, used as the webhook signature secret
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Groq API key for chat completions. When absent the server still
    /// starts; generation turns fail upstream and are swallowed by the
    /// relay's error policy.
    pub groq_api_key: Option<String>,

    /// Override for the completion model (`GROQ_MODEL`).
    pub groq_model: Option<String>,

    /// Override for the Groq API base URL (`GROQ_API_BASE`).
    pub groq_api_base: Option<String>,

    /// Retell API key. When set, webhook requests carrying an
    /// `x-retell-signature` header are verified against it.
    pub retell_api_key: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                variable: "PORT".to_string(),
                message: e.to_string(),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let config = Self {
            host,
            port,
            groq_api_key: env_non_empty("GROQ_API_KEY"),
            groq_model: env_non_empty("GROQ_MODEL"),
            groq_api_base: env_non_empty("GROQ_API_BASE"),
            retell_api_key: env_non_empty("RETELL_API_KEY"),
        };

        if config.groq_api_key.is_none() {
            warn!("GROQ_API_KEY not set, completion calls will fail");
        }
        if config.retell_api_key.is_none() {
            warn!("RETELL_API_KEY not set, webhook signatures will not be verified");
        }

        Ok(config)
    }

    /// Full bind address as `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read an environment variable, treating empty strings as unset.
fn env_non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "HOST",
            "PORT",
            "GROQ_API_KEY",
            "GROQ_MODEL",
            "GROQ_API_BASE",
            "RETELL_API_KEY",
        ] {
            unsafe { env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn defaults_when_env_is_empty() {
        clear_env();
        let config = ServerConfig::from_env().expect("Should load");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.groq_api_key.is_none());
        assert!(config.retell_api_key.is_none());
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn reads_values_from_env() {
        clear_env();
        unsafe {
            env::set_var("HOST", "127.0.0.1");
            env::set_var("PORT", "9090");
            env::set_var("GROQ_API_KEY", "gsk_test");
            env::set_var("RETELL_API_KEY", "key_test");
        }
        let config = ServerConfig::from_env().expect("Should load");
        assert_eq!(config.address(), "127.0.0.1:9090");
        assert_eq!(config.groq_api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.retell_api_key.as_deref(), Some("key_test"));
        clear_env();
    }

    #[test]
    #[serial]
    fn rejects_unparseable_port() {
        clear_env();
        unsafe { env::set_var("PORT", "not-a-port") };
        let err = ServerConfig::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue { variable, .. } => assert_eq!(variable, "PORT"),
        }
        clear_env();
    }

    #[test]
    #[serial]
    fn empty_string_counts_as_unset() {
        clear_env();
        unsafe { env::set_var("GROQ_API_KEY", "") };
        let config = ServerConfig::from_env().expect("Should load");
        assert!(config.groq_api_key.is_none());
        clear_env();
    }
}
