//! Report printing
//!
//! Reports are rendered by a [`ReportFormatter`]: plain tab-aligned text,
//! the same layout with ANSI colors, or JSON.

mod formatter;
mod colored;
mod json;

pub use self::formatter::{format_duration, FormattingOptions, PlainFormatter, ReportFormatter};
pub use self::colored::{ColorScheme, ColoredFormatter, PerformanceLevel};
pub use self::json::JsonFormatter;

use crate::{
    config::ValidationWarning,
    error::Result,
    models::{AggregateReport, Config, ProbeReport},
    stats::ResponseTimeDistribution,
};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn ReportFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }

    /// Create the formatter the configuration asks for
    pub fn from_config(config: &Config) -> Box<dyn ReportFormatter> {
        if config.json_output {
            Box::new(JsonFormatter::new())
        } else {
            Self::create_formatter(config.enable_color, config.verbose)
        }
    }
}

/// Renders scenario results with the configured formatter
pub struct OutputCoordinator {
    formatter: Box<dyn ReportFormatter>,
}

impl OutputCoordinator {
    /// Create a new output coordinator with the specified formatter
    pub fn new(formatter: Box<dyn ReportFormatter>) -> Self {
        Self { formatter }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(OutputFormatterFactory::from_config(config))
    }

    pub fn display_probe(&self, report: &ProbeReport) -> Result<String> {
        self.formatter.format_probe(report)
    }

    pub fn display_aggregate(
        &self,
        report: &AggregateReport,
        distribution: Option<&ResponseTimeDistribution>,
    ) -> Result<String> {
        self.formatter.format_aggregate(report, distribution)
    }

    /// One line per configuration warning
    pub fn display_warnings(&self, warnings: &[ValidationWarning]) -> Result<Vec<String>> {
        warnings
            .iter()
            .map(|warning| self.formatter.format_warning(&warning.message))
            .collect()
    }
}
