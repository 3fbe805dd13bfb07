//! Client configuration
//!
//! Values are resolved from built-in defaults, an optional `shortlink.toml`
//! file and `SHORTLINK_*` environment variables, in that order.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix for environment variable overrides (e.g. `SHORTLINK_BASE_URL`)
pub const ENV_PREFIX: &str = "SHORTLINK";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Loading or deserializing a configuration source failed
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A configuration value is out of range or malformed
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// API client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL (default: <http://localhost:3000/api>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds (default: 10)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// File holding the persisted session (default: `shortlink-session.json`)
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,

    /// Path of the login surface announced on session invalidation
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_connect_timeout() -> u64 {
    10
}

fn default_session_file() -> PathBuf {
    PathBuf::from("shortlink-session.json")
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_user_agent() -> String {
    format!("Shortlink/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            session_file: default_session_file(),
            login_path: default_login_path(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from defaults, `shortlink.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let loaded = Self::load_unvalidated()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Layer the same sources as [`ClientConfig::load`] without validating
    ///
    /// For callers that apply their own overrides and call
    /// [`ClientConfig::validate`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed.
    pub fn load_unvalidated() -> Result<Self, ConfigError> {
        Self::load_unvalidated_from(config::File::with_name("shortlink").required(false))
    }

    /// Load configuration using an explicit file source
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the result is invalid.
    pub fn load_from<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let loaded = Self::load_unvalidated_from(file)?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Layer an explicit file source and the environment without validating
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed.
    pub fn load_unvalidated_from<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            .add_source(file)
            // SHORTLINK_BASE_URL, SHORTLINK_TIMEOUT_SECS, ...
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Create a configuration for testing against a local mock server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
            ..Self::default()
        }
    }

    /// Check that the configuration can drive a client
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https://, got {base}"
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
