//! Error handling for the proxy tester

use thiserror::Error;

/// Error taxonomy shared by the probe, the runner and the scenarios
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Connect phase failed (unreachable, refused, timed out)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Write phase failed or wrote fewer bytes than the payload
    #[error("Write error: {0}")]
    Write(String),

    /// Read phase failed or returned fewer bytes than expected
    #[error("Read error: {0}")]
    Read(String),

    /// Balancer response did not match the expected value
    #[error("Received response doesn't match expected at index {index} ({actual} != {expected})")]
    Mismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors outside the probe itself (.env files, stdout)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new connection error
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection(message.into())
    }

    /// Create a new write error
    pub fn write<S: Into<String>>(message: S) -> Self {
        Self::Write(message.into())
    }

    /// Create a new read error
    pub fn read<S: Into<String>>(message: S) -> Self {
        Self::Read(message.into())
    }

    /// Create a mismatch error for the probe at `index`
    pub fn mismatch(index: usize, expected: &[u8], actual: &[u8]) -> Self {
        Self::Mismatch {
            index,
            expected: String::from_utf8_lossy(expected).into_owned(),
            actual: String::from_utf8_lossy(actual).into_owned(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Prefix the message with `context`, keeping the variant
    pub fn with_prefix(self, context: &str) -> Self {
        match self {
            Self::Connection(msg) => Self::Connection(format!("{}: {}", context, msg)),
            Self::Write(msg) => Self::Write(format!("{}: {}", context, msg)),
            Self::Read(msg) => Self::Read(format!("{}: {}", context, msg)),
            Self::Config(msg) => Self::Config(format!("{}: {}", context, msg)),
            Self::Validation(msg) => Self::Validation(format!("{}: {}", context, msg)),
            Self::Io(msg) => Self::Io(format!("{}: {}", context, msg)),
            Self::Parse(msg) => Self::Parse(format!("{}: {}", context, msg)),
            Self::Internal(msg) => Self::Internal(format!("{}: {}", context, msg)),
            mismatch @ Self::Mismatch { .. } => mismatch,
        }
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "CONNECT",
            Self::Write(_) => "WRITE",
            Self::Read(_) => "READ",
            Self::Mismatch { .. } => "MISMATCH",
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// True for failures raised by one of the three probe phases
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Write(_) | Self::Read(_))
    }

    /// Index of the failing probe, for balancer mismatches
    pub fn failed_index(&self) -> Option<usize> {
        match self {
            Self::Mismatch { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Connection(msg) => {
                format!("Could not connect: {}\n\nSuggestion: Check that the proxy is running and the address is host:port.", msg)
            }
            Self::Write(msg) => {
                format!("Sending the payload failed: {}\n\nSuggestion: The proxy may have closed the connection early.", msg)
            }
            Self::Read(msg) => {
                format!("Reading the response failed: {}\n\nSuggestion: The target must echo back as many bytes as it received.", msg)
            }
            Self::Mismatch { index, expected, actual } => {
                format!("Request #{} got '{}' instead of '{}'\n\nSuggestion: Check the proxy's balancing order and upstream list.", index, actual, expected)
            }
            Self::Config(msg) | Self::Validation(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check your .env file or command line arguments.", msg)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check file permissions.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse input: {}\n\nSuggestion: Check the format of your configuration values.", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,
            Self::Connection(_) | Self::Write(_) | Self::Read(_) => 2,
            Self::Mismatch { .. } => 3,
            Self::Io(_) => 5,
            Self::Internal(_) => 99,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Connection(_) | Self::Write(_) | Self::Read(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Mismatch { .. } => {
                    format!("[{}] {}", category.magenta().bold(), message.magenta())
                }
                Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON error: {}", error))
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::str::ParseBoolError> for AppError {
    fn from(error: std::str::ParseBoolError) -> Self {
        Self::parse(format!("Boolean parse error: {}", error))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::internal(format!("Probe worker did not complete: {}", error))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error context trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error
    fn context(self, message: &'static str) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_prefix(&f()))
    }

    fn context(self, message: &'static str) -> Result<T> {
        self.with_context(|| message.to_string())
    }
}

/// Error reporter for user-facing error output
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ErrorReporter {
    /// Create a new error reporter
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Render an error the way `report_error` prints it
    pub fn render(&self, error: &AppError) -> String {
        let mut out = error.format_for_console(self.use_color);
        if self.verbose {
            out.push_str("\n\n");
            out.push_str(&error.user_friendly_message());
        }
        out
    }

    /// Report an error to the user
    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", self.render(error));
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}
