//! JSON formatter for machine-readable reports

use crate::{
    error::Result,
    models::{AggregateReport, ProbeReport},
    stats::ResponseTimeDistribution,
};
use super::formatter::ReportFormatter;
use serde::Serialize;

#[derive(Serialize)]
struct AggregateDocument<'a> {
    #[serde(flatten)]
    report: &'a AggregateReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    distribution: Option<&'a ResponseTimeDistribution>,
}

/// Pretty-printed JSON, durations as integer nanoseconds
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_probe(&self, report: &ProbeReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn format_aggregate(
        &self,
        report: &AggregateReport,
        distribution: Option<&ResponseTimeDistribution>,
    ) -> Result<String> {
        Ok(serde_json::to_string_pretty(&AggregateDocument { report, distribution })?)
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(serde_json::json!({ "warning": warning }).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::time::Duration;

    #[test]
    fn test_probe_json_fields() {
        let report = ProbeReport::new(
            b"hello".to_vec(),
            Duration::from_nanos(100),
            Duration::from_nanos(20),
            Duration::from_nanos(30),
        );
        let json: Value = serde_json::from_str(&JsonFormatter::new().format_probe(&report).unwrap()).unwrap();

        assert_eq!(json["response"], "hello");
        assert_eq!(json["dial_ns"], 100);
        assert_eq!(json["write_ns"], 20);
        assert_eq!(json["read_ns"], 30);
        assert_eq!(json["response_time_ns"], 150);
    }

    #[test]
    fn test_aggregate_json_with_distribution() {
        let report = AggregateReport {
            total_requests: 2,
            avg_response_time: Duration::from_micros(5),
            ..Default::default()
        };
        let distribution = ResponseTimeDistribution {
            min: Duration::from_micros(4),
            p50: Duration::from_micros(4),
            p90: Duration::from_micros(6),
            p99: Duration::from_micros(6),
            max: Duration::from_micros(6),
        };

        let formatter = JsonFormatter::new();
        let json: Value = serde_json::from_str(&formatter.format_aggregate(&report, Some(&distribution)).unwrap()).unwrap();
        assert_eq!(json["total_requests"], 2);
        assert_eq!(json["avg_response_time_ns"], 5_000);
        assert_eq!(json["distribution"]["max_ns"], 6_000);

        let json: Value = serde_json::from_str(&formatter.format_aggregate(&report, None).unwrap()).unwrap();
        assert!(json.get("distribution").is_none());
    }

    #[test]
    fn test_warning_is_json() {
        let out = JsonFormatter::new().format_warning("careful").unwrap();
        let json: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["warning"], "careful");
    }
}
