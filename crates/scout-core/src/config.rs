//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default API base, matching the development backend as seen from the
/// Android emulator.
pub const DEFAULT_API_BASE_URL: &str = "http://10.0.2.2:5000/api";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Configuration for the client core.
///
/// Loaded once at startup; every service receives it (or the parts it
/// needs) by reference from the service container rather than through any
/// ambient lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the remote school-discovery API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout for gateway calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Attempt budget for retried remote writes.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,

    /// Fixed delay between retry attempts.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Override for the durable storage directory. `None` means the
    /// platform default (`~/.scout`).
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_retry_max_attempts() -> u32 {
    DEFAULT_RETRY_MAX_ATTEMPTS
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Builds a configuration from defaults overridden by environment
    /// variables (`SCOUT_API_URL`, `SCOUT_REQUEST_TIMEOUT_SECS`,
    /// `SCOUT_RETRY_MAX_ATTEMPTS`, `SCOUT_RETRY_DELAY_MS`,
    /// `SCOUT_DATA_DIR`). Unparseable numeric values fall back to the
    /// default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SCOUT_API_URL") {
            config.api_base_url = url;
        }
        if let Some(secs) = env_u64("SCOUT_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = secs;
        }
        if let Some(attempts) = env_u64("SCOUT_RETRY_MAX_ATTEMPTS") {
            config.retry_max_attempts = attempts as u32;
        }
        if let Some(ms) = env_u64("SCOUT_RETRY_DELAY_MS") {
            config.retry_delay_ms = ms;
        }
        if let Ok(dir) = std::env::var("SCOUT_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }

        config
    }

    /// The per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The inter-attempt retry delay as a `Duration`.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
