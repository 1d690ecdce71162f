//! Mat configuration.
//!
//! Every value can be overridden through a `MATSIDE_*` environment variable;
//! unset or unparsable variables fall back to the defaults.

use crate::bout::DEFAULT_DURATION_SECS;
use std::time::Duration;

/// Settings for one mat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatConfig {
    /// Bout length used when the operator does not configure one
    pub default_bout_duration_secs: u32,
    /// Countdown tick period in milliseconds
    pub tick_interval_ms: u64,
    /// Remaining seconds at which the scoreboard warns
    pub final_stretch_secs: u32,
    /// Commands buffered per live bout session
    pub session_inbox_capacity: usize,
}

impl Default for MatConfig {
    fn default() -> Self {
        Self {
            default_bout_duration_secs: DEFAULT_DURATION_SECS,
            tick_interval_ms: 1000,
            final_stretch_secs: 30,
            session_inbox_capacity: 32,
        }
    }
}

impl MatConfig {
    /// Load configuration from environment variables
    ///
    /// - `MATSIDE_BOUT_DURATION_SECS` (default: 300)
    /// - `MATSIDE_TICK_INTERVAL_MS` (default: 1000)
    /// - `MATSIDE_FINAL_STRETCH_SECS` (default: 30)
    /// - `MATSIDE_SESSION_INBOX` (default: 32)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_bout_duration_secs: parse_env_or(
                "MATSIDE_BOUT_DURATION_SECS",
                defaults.default_bout_duration_secs,
            ),
            tick_interval_ms: parse_env_or("MATSIDE_TICK_INTERVAL_MS", defaults.tick_interval_ms),
            final_stretch_secs: parse_env_or(
                "MATSIDE_FINAL_STRETCH_SECS",
                defaults.final_stretch_secs,
            ),
            session_inbox_capacity: parse_env_or(
                "MATSIDE_SESSION_INBOX",
                defaults.session_inbox_capacity,
            ),
        }
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_bout_duration_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "MATSIDE_BOUT_DURATION_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                var: "MATSIDE_TICK_INTERVAL_MS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.final_stretch_secs > self.default_bout_duration_secs {
            return Err(ConfigError::Invalid {
                var: "MATSIDE_FINAL_STRETCH_SECS".to_string(),
                reason: format!(
                    "Cannot exceed the bout duration ({})",
                    self.default_bout_duration_secs
                ),
            });
        }

        if self.session_inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "MATSIDE_SESSION_INBOX".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
