//! Gateway configuration.

use std::time::Duration;

use crate::ValidationError;

/// Environment variable overriding the API base URL.
pub const API_BASE_ENV: &str = "MLFUND_API_BASE";
/// Base URL used when no override is present.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
/// Fixed request timeout owned by the gateway.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Where the gateway sends requests and how long it waits for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    base_url: String,
    timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_API_BASE),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl GatewayConfig {
    /// Build a config for an explicit base URL; a trailing `/` is dropped.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ValidationError> {
        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref())?,
            ..Self::default()
        })
    }

    /// Read `MLFUND_API_BASE` from the process environment.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(API_BASE_ENV).filter(|value| !value.trim().is_empty()) {
            Some(base_url) => Self::new(base_url),
            None => Ok(Self::default()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Join a path (with leading `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ValidationError::InvalidBaseUrl {
            value: raw.to_owned(),
        });
    }
    Ok(trimmed.to_owned())
}
