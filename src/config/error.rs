//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Warning window must be between 1 and 365 days, got {0}")]
    InvalidWarningWindow(u32),

    #[error("Warning window override for '{0}' must be between 1 and 365 days")]
    InvalidWindowOverride(String),

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
