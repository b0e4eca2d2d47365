//! Core formatting traits and the plain text implementation
//!
//! The plain layout is tab-aligned `label\t: value` lines, one per field,
//! which downstream scripts already grep for.

use crate::{
    error::Result,
    models::{AggregateReport, ProbeReport},
    stats::ResponseTimeDistribution,
};
use std::fmt::Write as _;
use std::time::Duration;

/// Main trait for report formatting
pub trait ReportFormatter {
    /// Format the report of a single probe
    fn format_probe(&self, report: &ProbeReport) -> Result<String>;

    /// Format an aggregate, with its spread when one is available
    fn format_aggregate(
        &self,
        report: &AggregateReport,
        distribution: Option<&ResponseTimeDistribution>,
    ) -> Result<String>;

    /// Format warning messages
    fn format_warning(&self, warning: &str) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone, Default)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Include the response time distribution
    pub verbose_mode: bool,
}

pub(crate) const PROBE_LABELS: [&str; 5] = [
    "Response\t: ",
    "Dial time\t: ",
    "Write time\t: ",
    "Read time\t: ",
    "Response time\t: ",
];

pub(crate) const AGGREGATE_LABELS: [&str; 5] = [
    "Request count\t\t: ",
    "Avg. dial time\t\t: ",
    "Avg. write time\t\t: ",
    "Avg. read time\t\t: ",
    "Avg. response time\t: ",
];

pub(crate) const DISTRIBUTION_LABELS: [&str; 5] = [
    "Min. response time\t: ",
    "P50 response time\t: ",
    "P90 response time\t: ",
    "P99 response time\t: ",
    "Max. response time\t: ",
];

/// Plain text formatter
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }
}

impl ReportFormatter for PlainFormatter {
    fn format_probe(&self, report: &ProbeReport) -> Result<String> {
        let values = [
            report.response_text(),
            format_duration(report.dial_duration()),
            format_duration(report.write_duration()),
            format_duration(report.read_duration()),
            format_duration(report.response_time()),
        ];

        let mut output = String::new();
        for (label, value) in PROBE_LABELS.iter().zip(values) {
            writeln!(output, "{}{}", label, value).ok();
        }
        Ok(output)
    }

    fn format_aggregate(
        &self,
        report: &AggregateReport,
        distribution: Option<&ResponseTimeDistribution>,
    ) -> Result<String> {
        let values = [
            report.total_requests.to_string(),
            format_duration(report.avg_dial_time),
            format_duration(report.avg_write_time),
            format_duration(report.avg_read_time),
            format_duration(report.avg_response_time),
        ];

        let mut output = String::new();
        for (label, value) in AGGREGATE_LABELS.iter().zip(values) {
            writeln!(output, "{}{}", label, value).ok();
        }

        if let (true, Some(distribution)) = (self.options.verbose_mode, distribution) {
            for (label, value) in DISTRIBUTION_LABELS.iter().zip(distribution_values(distribution)) {
                writeln!(output, "{}{}", label, format_duration(value)).ok();
            }
        }

        Ok(output)
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("Warning: {}", warning))
    }
}

pub(crate) fn distribution_values(distribution: &ResponseTimeDistribution) -> [Duration; 5] {
    [
        distribution.min,
        distribution.p50,
        distribution.p90,
        distribution.p99,
        distribution.max,
    ]
}

/// Render a duration the way Go's `time.Duration` prints it
///
/// Sub-second values use the largest unit that keeps the integer part
/// non-zero (`750ns`, `12.5µs`, `1.234567ms`); longer values use
/// `h`/`m`/`s` components (`2.5s`, `1m30s`). Zero prints as `0s`.
pub fn format_duration(duration: Duration) -> String {
    const MICRO: u128 = 1_000;
    const MILLI: u128 = 1_000_000;
    const SECOND: u128 = 1_000_000_000;
    const MINUTE: u128 = 60 * SECOND;
    const HOUR: u128 = 60 * MINUTE;

    let nanos = duration.as_nanos();
    match nanos {
        0 => "0s".to_string(),
        n if n < MICRO => format!("{}ns", n),
        n if n < MILLI => format!("{}µs", fixed_point(n, MICRO, 3)),
        n if n < SECOND => format!("{}ms", fixed_point(n, MILLI, 6)),
        n => {
            let hours = n / HOUR;
            let minutes = (n % HOUR) / MINUTE;
            let seconds = n % MINUTE;

            let mut out = String::new();
            if hours > 0 {
                write!(out, "{}h", hours).ok();
            }
            if hours > 0 || minutes > 0 {
                write!(out, "{}m", minutes).ok();
            }
            write!(out, "{}s", fixed_point(seconds, SECOND, 9)).ok();
            out
        }
    }
}

/// `value / unit` with up to `digits` fractional digits, trailing zeros trimmed
fn fixed_point(value: u128, unit: u128, digits: usize) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = digits);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
