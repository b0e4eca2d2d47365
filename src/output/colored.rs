//! Colored formatter implementation with terminal color support

use crate::{
    error::Result,
    models::{AggregateReport, ProbeReport},
    stats::ResponseTimeDistribution,
};
use super::formatter::{
    distribution_values, format_duration, FormattingOptions, ReportFormatter,
    AGGREGATE_LABELS, DISTRIBUTION_LABELS, PROBE_LABELS,
};
use colored::*;
use std::fmt::Write as _;
use std::time::Duration;

/// Latency classification for color coding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceLevel {
    Excellent,  // < 1ms
    Good,       // 1-10ms
    Fair,       // 10-50ms
    Poor,       // 50-200ms
    VeryPoor,   // > 200ms
}

impl PerformanceLevel {
    /// Classify a proxy round trip
    pub fn from_duration(duration: Duration) -> Self {
        let time_ms = duration.as_secs_f64() * 1000.0;
        if time_ms < 1.0 {
            Self::Excellent
        } else if time_ms < 10.0 {
            Self::Good
        } else if time_ms < 50.0 {
            Self::Fair
        } else if time_ms < 200.0 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }

    /// Get color for this performance level
    pub fn color(&self) -> Color {
        match self {
            Self::Excellent => Color::Green,
            Self::Good => Color::Cyan,
            Self::Fair => Color::Yellow,
            Self::Poor => Color::Magenta,
            Self::VeryPoor => Color::Red,
        }
    }

    /// Get descriptive text
    pub fn description(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub label: Color,
    pub response: Color,
    pub warning: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            label: Color::Blue,
            response: Color::Green,
            warning: Color::Yellow,
            muted: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self::with_color_scheme(options, ColorScheme::default())
    }

    /// Create a colored formatter with custom color scheme
    pub fn with_color_scheme(options: FormattingOptions, color_scheme: ColorScheme) -> Self {
        Self { options, color_scheme }
    }

    fn label(&self, label: &str) -> ColoredString {
        label.color(self.color_scheme.label).bold()
    }

    fn timing(&self, duration: Duration) -> ColoredString {
        format_duration(duration).as_str().color(PerformanceLevel::from_duration(duration).color())
    }

    /// Single phases stay muted; only totals are graded
    fn phase(&self, duration: Duration) -> ColoredString {
        format_duration(duration).as_str().color(self.color_scheme.muted)
    }
}

impl ReportFormatter for ColoredFormatter {
    fn format_probe(&self, report: &ProbeReport) -> Result<String> {
        let values = [
            report.response_text().as_str().color(self.color_scheme.response),
            self.phase(report.dial_duration()),
            self.phase(report.write_duration()),
            self.phase(report.read_duration()),
            self.timing(report.response_time()),
        ];

        let mut output = String::new();
        for (label, value) in PROBE_LABELS.iter().zip(values) {
            writeln!(output, "{}{}", self.label(label), value).ok();
        }
        Ok(output)
    }

    fn format_aggregate(
        &self,
        report: &AggregateReport,
        distribution: Option<&ResponseTimeDistribution>,
    ) -> Result<String> {
        let values = [
            report.total_requests.to_string().as_str().bold(),
            self.phase(report.avg_dial_time),
            self.phase(report.avg_write_time),
            self.phase(report.avg_read_time),
            self.timing(report.avg_response_time),
        ];

        let mut output = String::new();
        for (label, value) in AGGREGATE_LABELS.iter().zip(values) {
            writeln!(output, "{}{}", self.label(label), value).ok();
        }

        if let (true, Some(distribution)) = (self.options.verbose_mode, distribution) {
            for (label, value) in DISTRIBUTION_LABELS.iter().zip(distribution_values(distribution)) {
                writeln!(output, "{}{}", self.label(label), self.timing(value)).ok();
            }
            let level = PerformanceLevel::from_duration(distribution.p50);
            let verdict = format!("Median latency: {}", level.description());
            writeln!(output, "{}", verdict.as_str().color(level.color())).ok();
        }

        Ok(output)
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("{} {}", "Warning:".color(self.color_scheme.warning).bold(), warning))
    }
}
