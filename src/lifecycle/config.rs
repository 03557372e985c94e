//! Tracker configuration read from `EXPOFLOW_*` environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `EXPOFLOW_API_URL` | `http://localhost:5000/api` |
//! | `EXPOFLOW_REFRESH_SECS` | `30` |
//! | `EXPOFLOW_REQUEST_TIMEOUT_SECS` | `8` |
//! | `EXPOFLOW_FALLBACK` | `degrade` (or `fail`) |
//!
//! Values are trimmed; an empty value means "use the default".

use crate::fetcher::{FallbackPolicy, HttpSourceConfig};
use std::time::Duration;
use thiserror::Error;

pub const ENV_API_URL: &str = "EXPOFLOW_API_URL";
pub const ENV_REFRESH_SECS: &str = "EXPOFLOW_REFRESH_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "EXPOFLOW_REQUEST_TIMEOUT_SECS";
pub const ENV_FALLBACK: &str = "EXPOFLOW_FALLBACK";

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_REFRESH_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 8;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{variable} must be a positive integer number of seconds, got `{value}`")]
    InvalidSeconds { variable: &'static str, value: String },
    #[error("{variable} must be `degrade` or `fail`, got `{value}`")]
    InvalidFallback { variable: &'static str, value: String },
    #[error("order source could not be built: {0}")]
    Source(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub api_url: String,
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
    pub fallback: FallbackPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            fallback: FallbackPolicy::Degrade,
        }
    }
}

impl TrackerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_url = read(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        let refresh_interval = read(ENV_REFRESH_SECS)
            .map(|raw| parse_seconds(ENV_REFRESH_SECS, raw))
            .transpose()?
            .unwrap_or(Duration::from_secs(DEFAULT_REFRESH_SECS));

        let request_timeout = read(ENV_REQUEST_TIMEOUT_SECS)
            .map(|raw| parse_seconds(ENV_REQUEST_TIMEOUT_SECS, raw))
            .transpose()?
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        let fallback = read(ENV_FALLBACK)
            .map(|raw| match raw.to_ascii_lowercase().as_str() {
                "degrade" => Ok(FallbackPolicy::Degrade),
                "fail" => Ok(FallbackPolicy::Fail),
                _ => Err(ConfigError::InvalidFallback {
                    variable: ENV_FALLBACK,
                    value: raw,
                }),
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            api_url,
            refresh_interval,
            request_timeout,
            fallback,
        })
    }

    pub fn http_source(&self) -> HttpSourceConfig {
        HttpSourceConfig {
            base_url: self.api_url.clone(),
            request_timeout: self.request_timeout,
        }
    }
}

fn parse_seconds(variable: &'static str, raw: String) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
        _ => Err(ConfigError::InvalidSeconds { variable, value: raw }),
    }
}
