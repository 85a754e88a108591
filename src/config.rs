//! Client configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

pub const PREDICT_PATH: &str = "/predict";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid service URL '{0}' (expected http:// or https://)")]
    InvalidUrl(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClientBuild(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service base URL without a trailing slash
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `CARDIOPREDICT_API_URL`: default `http://localhost:5000`
    /// - `CARDIOPREDICT_REQUEST_TIMEOUT_SECS`: default 30
    /// - `CARDIOPREDICT_CONNECT_TIMEOUT_SECS`: default 5
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidUrl` if the URL scheme is not http(s).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidUrl` if the URL scheme is not http(s).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = match lookup("CARDIOPREDICT_API_URL") {
            Some(raw) if !raw.trim().is_empty() => normalize_base_url(&raw)?,
            _ => DEFAULT_API_URL.to_string(),
        };
        let secs = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|&v| v > 0)
                .unwrap_or(default)
        };

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(secs(
                "CARDIOPREDICT_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            connect_timeout: Duration::from_secs(secs(
                "CARDIOPREDICT_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )),
        })
    }

    /// Config pointing at `base_url` with default timeouts.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidUrl` if the URL scheme is not http(s).
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn predict_url(&self) -> String {
        format!("{}{PREDICT_PATH}", self.base_url)
    }

    #[must_use]
    pub fn health_url(&self) -> String {
        format!("{}{HEALTH_PATH}", self.base_url)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidUrl(raw.to_string()))
    }
}
