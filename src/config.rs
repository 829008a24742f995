//! Client configuration parsed from environment variables, plus the fixed
//! session and UI timing policy.

use std::time::Duration;

use crate::state::dashboard::TimeRange;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u32 = 5;

/// Client-side session lifetime, counted from a successful login.
pub const SESSION_EXPIRY_HOURS: u64 = 24;
pub const SESSION_EXPIRY: Duration = Duration::from_secs(SESSION_EXPIRY_HOURS * 60 * 60);

/// How long a toast stays visible before it dismisses itself.
pub const TOAST_DISMISS_AFTER: Duration = Duration::from_secs(3);

/// Pause between the login success acknowledgment and the redirect.
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(500);

/// Where a successful login lands when no redirect was recorded.
pub const DEFAULT_DESTINATION: &str = "/dashboard";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{0}': must start with http:// or https://")]
    InvalidBaseUrl(String),
    #[error("invalid PULSE_TIME_RANGE '{0}' (expected 24h, 7d or 30d)")]
    InvalidTimeRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin without a trailing slash.
    pub api_base_url: String,
    pub refresh_interval_secs: u32,
    pub time_range: TimeRange,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            time_range: TimeRange::default(),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `PULSE_API_BASE_URL`: default `http://localhost:8080`
    /// - `PULSE_REFRESH_INTERVAL_SECS`: default 5
    /// - `PULSE_TIME_RANGE`: `24h` (default), `7d` or `30d`
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or time range is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = normalize_base_url(
            &std::env::var("PULSE_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned()),
        )?;
        let time_range = match std::env::var("PULSE_TIME_RANGE") {
            Ok(raw) => raw.parse::<TimeRange>().map_err(|()| ConfigError::InvalidTimeRange(raw))?,
            Err(_) => TimeRange::default(),
        };

        Ok(Self {
            api_base_url,
            refresh_interval_secs: env_parse("PULSE_REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_INTERVAL_SECS),
            time_range,
        })
    }

    /// Replace the base URL, applying the same validation as `from_env`.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not an http(s) URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_base_url = normalize_base_url(raw)?;
        Ok(self)
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
