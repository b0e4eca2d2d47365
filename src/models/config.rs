//! Configuration data model and validation

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Per-phase timeout for connect, write and read; `None` disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: Option<u64>,

    /// Number of parallel probes for the simulate scenario
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Payload used by simulate when none is given
    #[serde(default = "default_payload")]
    pub default_payload: String,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Print reports as JSON instead of text
    #[serde(default)]
    pub json_output: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_secs(),
            concurrency: default_concurrency(),
            default_payload: default_payload(),
            enable_color: default_enable_color(),
            json_output: false,
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        self.validate_concurrency()?;
        self.validate_timeout()
    }

    /// Check the simulate burst size
    pub fn validate_concurrency(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(AppError::config("Concurrency must be greater than 0"));
        }

        if self.concurrency > crate::defaults::MAX_CONCURRENCY {
            return Err(AppError::config(format!(
                "Concurrency cannot exceed {}",
                crate::defaults::MAX_CONCURRENCY
            )));
        }

        Ok(())
    }

    /// Check the per-phase timeout bounds
    pub fn validate_timeout(&self) -> Result<()> {
        if let Some(timeout) = self.timeout_seconds {
            if timeout == 0 {
                return Err(AppError::config("Timeout must be greater than 0"));
            }

            if timeout > 300 {
                return Err(AppError::config("Timeout cannot exceed 300 seconds"));
            }
        }

        Ok(())
    }

    /// Merge `FTEST_*` environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(timeout) = std::env::var("FTEST_TIMEOUT_SECONDS") {
            let timeout = timeout.trim();
            self.timeout_seconds = if timeout.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(timeout.parse().map_err(|e| {
                    AppError::config(format!("Invalid FTEST_TIMEOUT_SECONDS value '{}': {}", timeout, e))
                })?)
            };
        }

        if let Ok(concurrency) = std::env::var("FTEST_CONCURRENCY") {
            self.concurrency = concurrency.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid FTEST_CONCURRENCY value '{}': {}", concurrency, e)))?;
        }

        if let Ok(payload) = std::env::var("FTEST_PAYLOAD") {
            self.default_payload = payload;
        }

        if let Ok(enable_color) = std::env::var("FTEST_ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid FTEST_ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        if let Ok(json) = std::env::var("FTEST_JSON") {
            self.json_output = json.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid FTEST_JSON value '{}': {}", json, e)))?;
        }

        Ok(())
    }
}

fn default_timeout_secs() -> Option<u64> {
    Some(crate::defaults::DEFAULT_TIMEOUT.as_secs())
}

fn default_concurrency() -> usize {
    crate::defaults::DEFAULT_CONCURRENCY
}

fn default_payload() -> String {
    crate::defaults::DEFAULT_PAYLOAD.to_string()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
