//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::{Cli, Command},
    config::{env::EnvManager, validation::{ConfigValidator, ValidationWarning}},
    error::Result,
    models::Config,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse the configuration and collect advisory warnings
    pub fn parse_with_warnings(&self) -> Result<(Config, Vec<ValidationWarning>)> {
        let mut config = Config::default();

        EnvManager::load_env_file(self.cli.debug)?;
        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);

        let uses_concurrency = matches!(self.cli.command, Command::Simulate { .. });
        let warnings = ConfigValidator::validate_comprehensive(&config, uses_concurrency)?;
        ConfigValidator::validate_address(self.cli.command.address())?;

        Ok((config, warnings))
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = Some(timeout);
        }
        if self.cli.no_timeout {
            config.timeout_seconds = None;
        }

        if self.cli.no_color {
            config.enable_color = false;
        }
        if self.cli.json {
            config.json_output = true;
            config.enable_color = false;
        }

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        if let Command::Simulate { concurrency, data, .. } = &self.cli.command {
            if let Some(concurrency) = concurrency {
                config.concurrency = *concurrency;
            }
            if let Some(data) = data {
                config.default_payload = data.clone();
            }
        }
    }
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let timeout = match config.timeout_seconds {
        Some(secs) => format!("{}s", secs),
        None => "disabled".to_string(),
    };

    [
        format!("Timeout: {}", timeout),
        format!("Concurrency: {}", config.concurrency),
        format!("Payload: {:?}", config.default_payload),
        format!("Color Output: {}", config.enable_color),
        format!("JSON Output: {}", config.json_output),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::env;
    use std::sync::Mutex;

    // Tests below touch process-wide FTEST_* variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            "FTEST_TIMEOUT_SECONDS",
            "FTEST_CONCURRENCY",
            "FTEST_PAYLOAD",
            "FTEST_ENABLE_COLOR",
            "FTEST_JSON",
        ] {
            env::remove_var(key);
        }
    }

    fn parse(args: &[&str]) -> Result<(Config, Vec<ValidationWarning>)> {
        ConfigParser::new(Cli::parse_from(args)).parse_with_warnings()
    }

    #[test]
    fn test_defaults_for_simulate() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let (config, warnings) = parse(&["ftest", "simulate", "127.0.0.1:9000"]).unwrap();
        assert_eq!(config.concurrency, 50);
        assert_eq!(config.default_payload, "hello world");
        assert_eq!(config.timeout_seconds, Some(10));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_cli_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let (config, _) = parse(&[
            "ftest", "simulate", "127.0.0.1:9000", "-c", "7", "-d", "abc",
            "--timeout", "3", "--no-color", "--verbose",
        ])
        .unwrap();
        assert_eq!(config.concurrency, 7);
        assert_eq!(config.default_payload, "abc");
        assert_eq!(config.timeout_seconds, Some(3));
        assert!(!config.enable_color);
        assert!(config.verbose);
        assert!(!config.debug);
    }

    #[test]
    fn test_env_then_cli_precedence() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("FTEST_CONCURRENCY", "12");
        env::set_var("FTEST_TIMEOUT_SECONDS", "4");

        let (config, _) = parse(&["ftest", "simulate", "127.0.0.1:9000"]).unwrap();
        assert_eq!(config.concurrency, 12);
        assert_eq!(config.timeout_seconds, Some(4));

        let (config, _) = parse(&["ftest", "simulate", "127.0.0.1:9000", "-c", "2", "--timeout", "9"]).unwrap();
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.timeout_seconds, Some(9));

        clear_env();
    }

    #[test]
    fn test_no_timeout_warns() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let (config, warnings) = parse(&["ftest", "--no-timeout", "ping", "127.0.0.1:9000"]).unwrap();
        assert_eq!(config.timeout_seconds, None);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_json_disables_color() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let (config, _) = parse(&["ftest", "--json", "ping", "127.0.0.1:9000"]).unwrap();
        assert!(config.json_output);
        assert!(!config.enable_color);
    }

    #[test]
    fn test_invalid_env_value_is_config_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("FTEST_CONCURRENCY", "many");

        let error = parse(&["ftest", "ping", "127.0.0.1:9000"]).unwrap_err();
        assert_eq!(error.category(), "CONFIG");

        clear_env();
    }

    #[test]
    fn test_env_concurrency_only_checked_for_simulate() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("FTEST_CONCURRENCY", "0");

        let (config, _) = parse(&["ftest", "ping", "127.0.0.1:9000"]).unwrap();
        assert_eq!(config.concurrency, 0);
        assert!(parse(&["ftest", "balancer", "127.0.0.1:9000", "-d", "a", "-e", "a"]).is_ok());

        let error = parse(&["ftest", "simulate", "127.0.0.1:9000"]).unwrap_err();
        assert_eq!(error.category(), "CONFIG");

        clear_env();
    }

    #[test]
    fn test_bad_address_is_validation_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let error = parse(&["ftest", "ping", "no-port-here"]).unwrap_err();
        assert_eq!(error.category(), "VALIDATION");
    }

    #[test]
    fn test_config_summary() {
        let summary = display_config_summary(&Config { timeout_seconds: None, ..Default::default() });
        assert!(summary.contains("Timeout: disabled"));
        assert!(summary.contains("Concurrency: 50"));
        assert!(summary.contains("\"hello world\""));
    }
}
