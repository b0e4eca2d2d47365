//! ftest
//!
//! Probing and load-testing harness for TCP proxies. Each probe opens a
//! connection, writes a payload, reads back a response of the same length
//! and records how long each phase took. Probes run once (`ping`), as an
//! ordered sequence checked against expected replies (`balancer`), or as a
//! concurrent burst whose timings are averaged (`simulate`).

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod scenario;
pub mod stats;

// Re-export commonly used types
pub use client::{ProbeSettings, Prober, TcpProber};
pub use error::{AppError, Result};
pub use executor::ConcurrentRunner;
pub use models::{AggregateReport, Config, ProbeOutcome, ProbeReport};
pub use output::{ColoredFormatter, JsonFormatter, OutputCoordinator, OutputFormatterFactory, PlainFormatter, ReportFormatter};
pub use stats::{aggregate, aggregate_with, AveragingMode, ResponseTimeDistribution};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Build metadata embedded by build.rs
pub mod build_info {
    pub const BUILD_TIME: &str = env!("BUILD_TIME");
    pub const GIT_COMMIT: Option<&str> = option_env!("GIT_COMMIT");
    pub const TARGET_TRIPLE: &str = env!("TARGET_TRIPLE");
}

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_CONCURRENCY: usize = 50;
    pub const DEFAULT_PAYLOAD: &str = "hello world";
    pub const DEFAULT_ENABLE_COLOR: bool = true;
    pub const MAX_CONCURRENCY: usize = 10_000;
}
