//! Backend endpoint configuration resolved once at process start.
//!
//! Two environment values cover everything the adapter needs:
//! `CATALOGUE_API_BASE_URL` (required) and `CATALOGUE_API_TIMEOUT_SECONDS`
//! (optional, defaults to 30). Resolution goes through an injectable lookup
//! so tests never mutate process environment.

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Environment variable naming the backend's base URL.
pub const BASE_URL_VAR: &str = "CATALOGUE_API_BASE_URL";

/// Environment variable overriding the request timeout, in whole seconds.
pub const TIMEOUT_VAR: &str = "CATALOGUE_API_TIMEOUT_SECONDS";

/// Failures while resolving backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The base URL variable was not set.
    #[error("{BASE_URL_VAR} must be set to the backend base URL")]
    MissingBaseUrl,
    /// The base URL variable did not hold a usable absolute URL.
    #[error("{BASE_URL_VAR} is not a usable base URL: {message}")]
    InvalidBaseUrl {
        /// What was wrong with the value.
        message: String,
    },
    /// The timeout variable did not hold a positive whole number of seconds.
    #[error("{TIMEOUT_VAR} must be a positive whole number of seconds, got {value:?}")]
    InvalidTimeout {
        /// The rejected value.
        value: String,
    },
}

/// Where and how to reach the catalogue backend.
///
/// # Examples
/// ```
/// use client::config::BackendConfig;
///
/// let config = BackendConfig::from_lookup(|key| match key {
///     "CATALOGUE_API_BASE_URL" => Some("https://api.example.test/v1".to_owned()),
///     _ => None,
/// })
/// .unwrap();
/// assert_eq!(config.base_url().as_str(), "https://api.example.test/v1");
/// assert_eq!(config.request_timeout().as_secs(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: Url,
    request_timeout: Duration,
}

impl BackendConfig {
    /// Timeout applied when the environment does not override it.
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Configuration with the default request timeout.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Resolve configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the base URL is missing or unusable, or
    /// when the timeout override is not a positive whole number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration through `lookup` instead of the environment.
    ///
    /// # Errors
    /// As for [`Self::from_env`].
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let raw_base = lookup(BASE_URL_VAR).ok_or(ConfigError::MissingBaseUrl)?;
        let base_url = parse_base_url(&raw_base)?;
        let config = Self::new(base_url);
        match lookup(TIMEOUT_VAR) {
            Some(raw_timeout) => {
                let timeout = parse_timeout(&raw_timeout)?;
                Ok(config.with_request_timeout(timeout))
            }
            None => Ok(config),
        }
    }

    /// Base URL every collection path is appended to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-request timeout for the HTTP client. No retries follow it.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let base_url = Url::parse(raw.trim()).map_err(|error| ConfigError::InvalidBaseUrl {
        message: error.to_string(),
    })?;
    // Collection paths are appended as segments, which cannot-be-a-base URLs
    // (mailto:, data:) do not support.
    if base_url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl {
            message: format!("{raw:?} cannot carry path segments"),
        });
    }
    Ok(base_url)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let seconds: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidTimeout {
            value: raw.to_owned(),
        })?;
    if seconds == 0 {
        return Err(ConfigError::InvalidTimeout {
            value: raw.to_owned(),
        });
    }
    Ok(Duration::from_secs(seconds))
}
