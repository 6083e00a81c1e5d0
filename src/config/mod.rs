//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MICSA_OS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use micsa_ops::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Drafts stored in {}", config.storage.data_dir.display());
//! ```

mod compliance;
mod error;
mod storage;
mod telemetry;

pub use compliance::ComplianceConfig;
pub use error::{ConfigError, ValidationError};
pub use storage::{StorageBackend, StorageConfig};
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Local storage for drafts
    #[serde(default)]
    pub storage: StorageConfig,

    /// Expiry warning windows
    #[serde(default)]
    pub compliance: ComplianceConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MICSA_OS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MICSA_OS__STORAGE__DATA_DIR=/var/lib/micsa` -> `storage.data_dir`
    /// - `MICSA_OS__COMPLIANCE__WARNING_WINDOW_DAYS=45` -> `compliance.warning_window_days`
    /// - `MICSA_OS__COMPLIANCE__WINDOW_OVERRIDES__REPSE=60` -> per registry window
    /// - `MICSA_OS__COMPLIANCE__REQUIRED_COURSES=Altura,Espacios confinados`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MICSA_OS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("compliance.required_courses")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.compliance.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "MICSA_OS__STORAGE__BACKEND",
        "MICSA_OS__STORAGE__DATA_DIR",
        "MICSA_OS__COMPLIANCE__WARNING_WINDOW_DAYS",
        "MICSA_OS__COMPLIANCE__WINDOW_OVERRIDES__REPSE",
        "MICSA_OS__COMPLIANCE__REQUIRED_COURSES",
        "MICSA_OS__TELEMETRY__JSON_LOGS",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.compliance.warning_window_days, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MICSA_OS__STORAGE__BACKEND", "memory");
        env::set_var("MICSA_OS__STORAGE__DATA_DIR", "/tmp/micsa");
        env::set_var("MICSA_OS__COMPLIANCE__WARNING_WINDOW_DAYS", "45");
        env::set_var("MICSA_OS__TELEMETRY__JSON_LOGS", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/micsa"));
        assert_eq!(config.compliance.warning_window_days, 45);
        assert!(config.telemetry.json_logs);
    }

    #[test]
    fn test_window_override_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MICSA_OS__COMPLIANCE__WINDOW_OVERRIDES__REPSE", "60");
        let result = AppConfig::load();
        clear_env();

        let policy = result.unwrap().compliance.policy();
        assert_eq!(policy.window_for("REPSE"), 60);
        assert_eq!(policy.window_for("SAT"), 30);
    }

    #[test]
    fn test_required_courses_list_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MICSA_OS__COMPLIANCE__REQUIRED_COURSES", "Altura,Espacios confinados");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.compliance.required_courses,
            vec!["Altura".to_string(), "Espacios confinados".to_string()]
        );
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MICSA_OS__COMPLIANCE__WARNING_WINDOW_DAYS", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidWarningWindow(0))
        );
    }
}
