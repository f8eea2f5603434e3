//! Runtime configuration loaded from environment variables.

use std::time::Duration;

use orchestration::OrchestratorConfig;
use specialists::mode;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Specialist endpoint and engine settings with sensible defaults.
///
/// Reads from environment variables:
/// - `SPECIALIST_BASE_URL`: root of the specialist services (default: `"http://localhost:5000"`)
/// - `SPECIALIST_MODE`: backend mode applied to every specialist (default: `"llm"`)
/// - `SPECIALIST_TIMEOUT_MS`: per-call timeout in milliseconds (default: `30000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub mode: String,
    pub timeout_ms: u64,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset; an unparsable timeout keeps the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            base_url: get("SPECIALIST_BASE_URL").unwrap_or(defaults.base_url),
            mode: get("SPECIALIST_MODE")
                .map(|value| mode::normalize(&value))
                .unwrap_or(defaults.mode),
            timeout_ms: get("SPECIALIST_TIMEOUT_MS")
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(defaults.timeout_ms),
            log_level: get("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Engine settings derived from this configuration.
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            call_timeout: self.call_timeout(),
            mode: self.mode.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: mode::DEFAULT_MODE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            log_level: "info".to_string(),
        }
    }
}
