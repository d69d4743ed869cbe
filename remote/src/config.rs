//! Remote service configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default base URL of the remote car park service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/car-park";

/// Default per-request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Where the remote service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL; operations are posted to `{base_url}/{operation}`
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl RemoteConfig {
    /// Configuration pointing at `base_url` with the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `CAR_PARK_REMOTE_URL` and `CAR_PARK_REMOTE_TIMEOUT_MS`. Unset or
    /// unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("CAR_PARK_REMOTE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout_ms: env::var("CAR_PARK_REMOTE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Builder: set the per-request timeout
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Timeouts beyond u64 millis are not meaningful
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Per-request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Full URL of one operation
    #[must_use]
    pub fn endpoint(&self, operation: &str) -> String {
        format!("{}/{operation}", self.base_url.trim_end_matches('/'))
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
