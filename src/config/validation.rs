//! Configuration validation utilities and rules

use crate::{
    models::Config,
    error::{AppError, Result},
};

/// Concurrency above which a warning about file descriptors is emitted
const HIGH_CONCURRENCY: usize = 1_000;

/// Configuration validator with advisory checks on top of `Config::validate`
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration, returning advisory warnings on success
    ///
    /// Concurrency is only checked when the command runs a burst.
    pub fn validate_comprehensive(config: &Config, uses_concurrency: bool) -> Result<Vec<ValidationWarning>> {
        if uses_concurrency {
            config.validate()?;
        } else {
            config.validate_timeout()?;
        }

        Ok(Self::validate_performance_settings(config, uses_concurrency))
    }

    fn validate_performance_settings(config: &Config, uses_concurrency: bool) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if uses_concurrency && config.concurrency > HIGH_CONCURRENCY {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Concurrency {} opens that many sockets at once; check the open file limit (ulimit -n)",
                    config.concurrency
                ),
            ));
        }

        match config.timeout_seconds {
            None => warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                "Timeouts are disabled; a silent target will block the run indefinitely".to_string(),
            )),
            Some(secs) if secs >= 60 => warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Timeout of {}s is long for a latency probe", secs),
            )),
            Some(_) => {}
        }

        warnings
    }

    /// Check that `address` has the `host:port` shape the probe expects
    pub fn validate_address(address: &str) -> Result<()> {
        let (host, port) = address.rsplit_once(':').ok_or_else(|| {
            AppError::validation(format!("Address '{}' must be of the form host:port", address))
        })?;

        if host.is_empty() {
            return Err(AppError::validation(format!("Address '{}' is missing a host", address)));
        }

        // Bare IPv6 literals are ambiguous; they must be bracketed
        if host.contains(':') && !(host.starts_with('[') && host.ends_with(']')) {
            return Err(AppError::validation(format!(
                "IPv6 address '{}' must be written as [addr]:port",
                address
            )));
        }

        port.parse::<u16>()
            .map_err(|e| AppError::validation(format!("Invalid port in '{}': {}", address, e)))?;

        Ok(())
    }
}

/// Severity of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    /// Create a new validation warning
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
        ConfigValidator::validate_comprehensive(config, true)
    }

    #[test]
    fn test_default_config_has_no_warnings() {
        let warnings = validate_config(&Config::default()).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_invalid_config_is_error() {
        let config = Config { concurrency: 0, ..Default::default() };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_high_concurrency_warning() {
        let config = Config { concurrency: 5_000, ..Default::default() };
        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, ValidationLevel::Warning);
        assert!(warnings[0].message.contains("ulimit"));
    }

    #[test]
    fn test_concurrency_ignored_without_burst() {
        let zero = Config { concurrency: 0, ..Default::default() };
        assert!(ConfigValidator::validate_comprehensive(&zero, false).unwrap().is_empty());

        let huge = Config { concurrency: 5_000, ..Default::default() };
        assert!(ConfigValidator::validate_comprehensive(&huge, false).unwrap().is_empty());

        let bad_timeout = Config { concurrency: 0, timeout_seconds: Some(0), ..Default::default() };
        assert!(ConfigValidator::validate_comprehensive(&bad_timeout, false).is_err());
    }

    #[test]
    fn test_timeout_warnings() {
        let disabled = Config { timeout_seconds: None, ..Default::default() };
        let warnings = validate_config(&disabled).unwrap();
        assert!(warnings[0].message.contains("disabled"));

        let long = Config { timeout_seconds: Some(120), ..Default::default() };
        let warnings = validate_config(&long).unwrap();
        assert_eq!(warnings[0].level, ValidationLevel::Info);
    }

    #[test]
    fn test_address_validation() {
        assert!(ConfigValidator::validate_address("127.0.0.1:9000").is_ok());
        assert!(ConfigValidator::validate_address("localhost:80").is_ok());
        assert!(ConfigValidator::validate_address("[::1]:9000").is_ok());

        assert!(ConfigValidator::validate_address("127.0.0.1").is_err());
        assert!(ConfigValidator::validate_address(":9000").is_err());
        assert!(ConfigValidator::validate_address("::1:9000").is_err());
        assert!(ConfigValidator::validate_address("host:http").is_err());
        assert!(ConfigValidator::validate_address("host:70000").is_err());
    }
}
