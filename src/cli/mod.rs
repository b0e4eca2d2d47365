//! Command-line interface

use clap::{Parser, Subcommand};

/// ftest - probe a TCP proxy for latency, balancing and burst behavior
#[derive(Parser, Debug, Clone)]
#[command(name = "ftest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Per-phase timeout in seconds for connect, write and read
    #[arg(long, global = true, value_parser = parse_duration)]
    pub timeout: Option<u64>,

    /// Wait indefinitely in every phase
    #[arg(long, global = true, conflicts_with = "timeout")]
    pub no_timeout: bool,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Probe scenarios
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send one payload and print the timing breakdown
    Ping {
        /// Target address as host:port
        address: String,

        /// Data to send
        #[arg(short = 'd', long = "data", default_value = "")]
        data: String,
    },

    /// Check that the proxy balances requests across its upstreams
    Balancer {
        /// Target address as host:port
        address: String,

        /// Comma separated data to send to the proxy
        #[arg(short = 'd', long = "data", value_delimiter = ',', required = true)]
        data: Vec<String>,

        /// Comma separated data to expect from the proxy
        #[arg(short = 'e', long = "expect", value_delimiter = ',', required = true)]
        expect: Vec<String>,
    },

    /// Fire a burst of concurrent requests and print the averages
    Simulate {
        /// Target address as host:port
        address: String,

        /// Number of concurrent requests [default: 50]
        #[arg(short = 'c', long = "concurrency", value_parser = parse_concurrency)]
        concurrency: Option<usize>,

        /// Data to send for each request [default: "hello world"]
        #[arg(short = 'd', long = "data")]
        data: Option<String>,
    },
}

impl Command {
    /// Target address of the scenario
    pub fn address(&self) -> &str {
        match self {
            Self::Ping { address, .. }
            | Self::Balancer { address, .. }
            | Self::Simulate { address, .. } => address,
        }
    }
}

impl Cli {
    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.no_color || self.json {
            false
        } else {
            supports_color()
        }
    }
}

/// Parse duration from seconds string
fn parse_duration(s: &str) -> Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid duration: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid duration: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Duration must be greater than 0".to_string())
            } else if secs > 300 {
                Err("Duration cannot exceed 300 seconds".to_string())
            } else {
                Ok(secs)
            }
        })
}

fn parse_concurrency(s: &str) -> Result<usize, String> {
    let value = s.parse::<usize>()
        .map_err(|_| format!("Invalid concurrency: {}", s))?;
    if value == 0 {
        return Err("Concurrency must be a positive number".to_string());
    }
    Ok(value)
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    cfg!(unix)
}
