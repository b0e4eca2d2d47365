//! Main application orchestration and execution

use crate::{
    cli::{Cli, Command},
    client::{ProbeSettings, Prober, TcpProber},
    config::{display_config_summary, ConfigParser, ValidationLevel, ValidationWarning},
    error::{ErrorContext, Result},
    executor::ConcurrentRunner,
    logging::{LoggerFactory, ProbeLogger},
    models::Config,
    output::OutputCoordinator,
    scenario,
};
use std::io::Write;
use std::sync::Arc;

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
    config: Config,
    warnings: Vec<ValidationWarning>,
}

impl App {
    /// Resolve configuration for the parsed command line
    pub fn new(cli: Cli) -> Result<Self> {
        let (config, warnings) = ConfigParser::new(cli.clone()).parse_with_warnings()?;
        Ok(Self { cli, config, warnings })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Run the selected scenario and print its report to stdout
    pub async fn run(self) -> Result<()> {
        let prober = Arc::new(TcpProber::new(ProbeSettings::from(&self.config)));
        let output = self.execute(prober).await?;

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", output.trim_end()).context("writing report")?;
        Ok(())
    }

    /// Run the selected scenario against `prober` and return the rendered report
    pub async fn execute(&self, prober: Arc<dyn Prober>) -> Result<String> {
        let coordinator = OutputCoordinator::from_config(&self.config);

        let shown: Vec<ValidationWarning> = self.warnings
            .iter()
            .filter(|w| w.level == ValidationLevel::Warning || self.config.verbose)
            .cloned()
            .collect();
        for line in coordinator.display_warnings(&shown)? {
            eprintln!("{}", line);
        }

        if self.config.debug {
            eprintln!("Configuration Summary:");
            eprintln!("{}", display_config_summary(&self.config));
            eprintln!();
        }

        let factory = LoggerFactory::new(self.config.clone());
        let logger: ProbeLogger = factory.create_probe_logger().await;

        match &self.cli.command {
            Command::Ping { address, data } => {
                let report = scenario::ping(&*prober, &logger, address, data.as_bytes()).await?;
                coordinator.display_probe(&report)
            }
            Command::Balancer { address, data, expect } => {
                let report = scenario::balancer(&*prober, &logger, address, data.as_slice(), expect.as_slice()).await?;
                coordinator.display_aggregate(&report, None)
            }
            Command::Simulate { address, .. } => {
                let runner = ConcurrentRunner::new(prober).with_logger(logger);
                let (report, distribution) = scenario::simulate_detailed(
                    &runner,
                    address,
                    self.config.default_payload.as_bytes(),
                    self.config.concurrency,
                )
                .await?;
                coordinator.display_aggregate(&report, distribution.as_ref())
            }
        }
    }
}
