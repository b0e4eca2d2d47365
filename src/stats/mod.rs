//! Aggregation of probe reports into averaged summaries
//!
//! The default averaging order divides every sample by the count before
//! summing (`Σ ⌊xᵢ / n⌋`). Reports produced by earlier releases of the tool
//! were computed this way, so it stays the default. [`AveragingMode::SumFirst`]
//! computes `⌊Σ xᵢ / n⌋` instead, which loses at most one nanosecond rather
//! than up to `n - 1`.

use crate::models::{report::serialize_nanos, AggregateReport, ProbeReport};
use serde::Serialize;
use std::time::Duration;

/// Order in which the per-field mean is computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AveragingMode {
    /// Truncate each sample's share, then sum
    #[default]
    DivideFirst,
    /// Sum all samples, then truncate once
    SumFirst,
}

/// Reduce reports into one averaged report using [`AveragingMode::DivideFirst`]
pub fn aggregate(reports: &[ProbeReport]) -> AggregateReport {
    aggregate_with(reports, AveragingMode::DivideFirst)
}

/// Reduce reports into one averaged report
pub fn aggregate_with(reports: &[ProbeReport], mode: AveragingMode) -> AggregateReport {
    let count = reports.len();
    if count == 0 {
        return AggregateReport::empty();
    }

    let mean = |field: fn(&ProbeReport) -> Duration| -> Duration {
        let n = count as u128;
        let nanos = match mode {
            AveragingMode::DivideFirst => reports
                .iter()
                .map(|r| field(r).as_nanos() / n)
                .sum::<u128>(),
            AveragingMode::SumFirst => {
                reports.iter().map(|r| field(r).as_nanos()).sum::<u128>() / n
            }
        };
        nanos_to_duration(nanos)
    };

    AggregateReport {
        total_requests: count,
        avg_response_time: mean(ProbeReport::response_time),
        avg_dial_time: mean(ProbeReport::dial_duration),
        avg_write_time: mean(ProbeReport::write_duration),
        avg_read_time: mean(ProbeReport::read_duration),
    }
}

fn nanos_to_duration(nanos: u128) -> Duration {
    let secs = (nanos / 1_000_000_000) as u64;
    let subsec = (nanos % 1_000_000_000) as u32;
    Duration::new(secs, subsec)
}

/// Spread of response times across a set of probes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseTimeDistribution {
    #[serde(rename = "min_ns", serialize_with = "serialize_nanos")]
    pub min: Duration,
    #[serde(rename = "p50_ns", serialize_with = "serialize_nanos")]
    pub p50: Duration,
    #[serde(rename = "p90_ns", serialize_with = "serialize_nanos")]
    pub p90: Duration,
    #[serde(rename = "p99_ns", serialize_with = "serialize_nanos")]
    pub p99: Duration,
    #[serde(rename = "max_ns", serialize_with = "serialize_nanos")]
    pub max: Duration,
}

impl ResponseTimeDistribution {
    /// Nearest-rank percentiles of `response_time`; `None` for no reports
    pub fn from_reports(reports: &[ProbeReport]) -> Option<Self> {
        let mut samples: Vec<Duration> = reports.iter().map(ProbeReport::response_time).collect();
        if samples.is_empty() {
            return None;
        }
        samples.sort_unstable();

        Some(Self {
            min: samples[0],
            p50: percentile(&samples, 50.0),
            p90: percentile(&samples, 90.0),
            p99: percentile(&samples, 99.0),
            max: samples[samples.len() - 1],
        })
    }
}

/// Nearest-rank percentile over sorted, non-empty samples
fn percentile(sorted: &[Duration], pct: f64) -> Duration {
    let rank = ((pct / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}
