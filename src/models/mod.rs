//! Data models for the proxy tester

pub mod config;
pub mod report;

// Re-export main model types
pub use config::Config;
pub use report::{AggregateReport, ProbeOutcome, ProbeReport};
