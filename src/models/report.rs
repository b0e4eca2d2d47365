//! Probe report, aggregate report and worker outcome models

use crate::error::{AppError, Result};
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Timings and response of one completed connect/write/read cycle
///
/// The only constructor derives `response_time` from the three phases, so
/// `response_time == dial + write + read` holds for every value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    #[serde(serialize_with = "serialize_lossy")]
    response: Vec<u8>,
    #[serde(rename = "response_time_ns", serialize_with = "serialize_nanos")]
    response_time: Duration,
    #[serde(rename = "dial_ns", serialize_with = "serialize_nanos")]
    dial_duration: Duration,
    #[serde(rename = "write_ns", serialize_with = "serialize_nanos")]
    write_duration: Duration,
    #[serde(rename = "read_ns", serialize_with = "serialize_nanos")]
    read_duration: Duration,
}

impl ProbeReport {
    /// Build a report from the measured phases
    pub fn new(
        response: Vec<u8>,
        dial_duration: Duration,
        write_duration: Duration,
        read_duration: Duration,
    ) -> Self {
        Self {
            response,
            response_time: dial_duration + write_duration + read_duration,
            dial_duration,
            write_duration,
            read_duration,
        }
    }

    pub fn response(&self) -> &[u8] {
        &self.response
    }

    /// Response bytes as text, replacing invalid UTF-8
    pub fn response_text(&self) -> String {
        String::from_utf8_lossy(&self.response).into_owned()
    }

    pub fn response_time(&self) -> Duration {
        self.response_time
    }

    pub fn dial_duration(&self) -> Duration {
        self.dial_duration
    }

    pub fn write_duration(&self) -> Duration {
        self.write_duration
    }

    pub fn read_duration(&self) -> Duration {
        self.read_duration
    }

    /// Total time in milliseconds
    pub fn response_ms(&self) -> f64 {
        self.response_time.as_secs_f64() * 1000.0
    }
}

/// Averaged summary across many probe reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    pub total_requests: usize,
    #[serde(rename = "avg_response_time_ns", serialize_with = "serialize_nanos")]
    pub avg_response_time: Duration,
    #[serde(rename = "avg_dial_ns", serialize_with = "serialize_nanos")]
    pub avg_dial_time: Duration,
    #[serde(rename = "avg_write_ns", serialize_with = "serialize_nanos")]
    pub avg_write_time: Duration,
    #[serde(rename = "avg_read_ns", serialize_with = "serialize_nanos")]
    pub avg_read_time: Duration,
}

impl AggregateReport {
    /// Report for zero probes
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn avg_response_ms(&self) -> f64 {
        self.avg_response_time.as_secs_f64() * 1000.0
    }
}

/// What a single worker hands back to the collector
#[derive(Debug)]
pub enum ProbeOutcome {
    Success(ProbeReport),
    Failure(AppError),
}

impl From<Result<ProbeReport>> for ProbeOutcome {
    fn from(result: Result<ProbeReport>) -> Self {
        match result {
            Ok(report) => Self::Success(report),
            Err(error) => Self::Failure(error),
        }
    }
}

pub(crate) fn serialize_nanos<S: Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    // u128 is not representable in every format; saturate instead
    let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
    serializer.serialize_u64(nanos)
}

fn serialize_lossy<S: Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}
