//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in multi-threaded runtimes
//! and test harnesses.

use crate::constants::{
    env, DEFAULT_AUTH_DELAY_MS, DEFAULT_GATEWAY_URL, DEFAULT_SENTINEL, DEFAULT_SESSION_FILE,
};
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    catalogue_file: Option<PathBuf>,
    session_file: PathBuf,
    gateway_url: String,
    filter_sentinel: String,
    auth_delay: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if the sentinel is blank or the gateway URL is not an
    /// `http(s)://` URL.
    pub fn new(
        catalogue_file: Option<PathBuf>,
        session_file: PathBuf,
        gateway_url: String,
        filter_sentinel: String,
        auth_delay: Duration,
    ) -> CoreResult<Self> {
        if filter_sentinel.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "filter sentinel cannot be empty".into(),
            ));
        }

        let gateway_url = gateway_url.trim().trim_end_matches('/').to_string();
        if !(gateway_url.starts_with("http://") || gateway_url.starts_with("https://")) {
            return Err(CoreError::InvalidInput(format!(
                "gateway URL must start with http:// or https://, got '{gateway_url}'"
            )));
        }

        Ok(Self {
            catalogue_file,
            session_file,
            gateway_url,
            filter_sentinel,
            auth_delay,
        })
    }

    /// Resolve configuration from the process environment.
    ///
    /// Call this once from a binary's `main`; library code receives the resulting value.
    pub fn from_env() -> CoreResult<Self> {
        let var = |name: &str| std::env::var(name).ok();

        Self::new(
            var(env::CATALOGUE_FILE)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            var(env::SESSION_FILE)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE)),
            var(env::GATEWAY_URL).unwrap_or_else(|| DEFAULT_GATEWAY_URL.into()),
            var(env::FILTER_SENTINEL).unwrap_or_else(|| DEFAULT_SENTINEL.into()),
            auth_delay_from_env_value(var(env::AUTH_DELAY_MS))?,
        )
    }

    pub fn catalogue_file(&self) -> Option<&Path> {
        self.catalogue_file.as_deref()
    }

    pub fn session_file(&self) -> &Path {
        &self.session_file
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    pub fn filter_sentinel(&self) -> &str {
        &self.filter_sentinel
    }

    pub fn auth_delay(&self) -> Duration {
        self.auth_delay
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            catalogue_file: None,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            gateway_url: DEFAULT_GATEWAY_URL.into(),
            filter_sentinel: DEFAULT_SENTINEL.into(),
            auth_delay: Duration::from_millis(DEFAULT_AUTH_DELAY_MS),
        }
    }
}

/// Parse the simulated authentication delay from an optional millisecond value.
///
/// If `value` is `None` or empty/whitespace, returns the default delay.
pub fn auth_delay_from_env_value(value: Option<String>) -> CoreResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(Duration::from_millis(DEFAULT_AUTH_DELAY_MS)),
        Some(v) => v.parse::<u64>().map(Duration::from_millis).map_err(|_| {
            CoreError::InvalidInput(format!(
                "{} must be a whole number of milliseconds, got '{v}'",
                env::AUTH_DELAY_MS
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_blank_sentinel() {
        let err = CoreConfig::new(
            None,
            PathBuf::from("s.json"),
            DEFAULT_GATEWAY_URL.into(),
            "  ".into(),
            Duration::ZERO,
        )
        .expect_err("blank sentinel should be rejected");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("sentinel")));
    }

    #[test]
    fn test_new_rejects_non_http_gateway_and_trims_trailing_slash() {
        let err = CoreConfig::new(
            None,
            PathBuf::from("s.json"),
            "localhost:8080".into(),
            "all".into(),
            Duration::ZERO,
        )
        .expect_err("scheme-less URL should be rejected");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("http")));

        let cfg = CoreConfig::new(
            None,
            PathBuf::from("s.json"),
            "http://backend:8080/".into(),
            "all".into(),
            Duration::ZERO,
        )
        .expect("valid config");
        assert_eq!(cfg.gateway_url(), "http://backend:8080");
    }

    #[test]
    fn test_auth_delay_from_env_value() {
        assert_eq!(
            auth_delay_from_env_value(None).unwrap(),
            Duration::from_millis(DEFAULT_AUTH_DELAY_MS)
        );
        assert_eq!(
            auth_delay_from_env_value(Some("  ".into())).unwrap(),
            Duration::from_millis(DEFAULT_AUTH_DELAY_MS)
        );
        assert_eq!(
            auth_delay_from_env_value(Some("250".into())).unwrap(),
            Duration::from_millis(250)
        );
        assert!(auth_delay_from_env_value(Some("soon".into())).is_err());
    }
}
