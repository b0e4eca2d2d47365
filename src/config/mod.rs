//! Configuration management module

pub mod parser;
pub mod validation;
pub mod env;

// Re-export main functionality
pub use parser::{ConfigParser, display_config_summary};
pub use validation::{ConfigValidator, ValidationLevel, ValidationWarning};
pub use env::EnvManager;

// Re-export from models for convenience
pub use crate::models::Config;
