//! Backend client configuration
//!
//! The only environment-driven setting is the backend base URL. A missing
//! or unparsable value falls back to [`DEFAULT_API_URL`] with a warning.

use thiserror::Error;
use tracing::{info, warn};
use url::Url;
use web_time::Duration;

use crate::constants::client::{API_URL_ENV, DEFAULT_API_URL, REQUEST_TIMEOUT_SECS};

/// Errors raised while building a [`ClientConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL could not be parsed.
    #[error("invalid backend URL `{url}`")]
    InvalidUrl {
        /// The rejected value
        url: String,
        /// Parser failure
        #[source]
        source: url::ParseError,
    },
}

/// Where the backend lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the REST paths are appended to
    pub api_base_url: Url,
    /// Timeout applied to every request
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Configuration for the backend at `url`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when `url` is not an absolute URL.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let api_base_url = Url::parse(url.trim()).map_err(|source| ConfigError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        })
    }

    /// Reads the base URL from the `TRIVIA_API_URL` environment variable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(API_URL_ENV).filter(|value| !value.trim().is_empty()) {
            Some(raw) => match Self::parse(&raw) {
                Ok(config) => {
                    info!(url = %config.api_base_url, "using backend URL from environment");
                    config
                }
                Err(err) => {
                    warn!(
                        variable = API_URL_ENV,
                        error = %err,
                        "invalid backend URL; falling back to default"
                    );
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::parse(DEFAULT_API_URL).expect("default backend URL is valid")
    }
}
