//! Compliance classification configuration

use serde::Deserialize;
use std::collections::HashMap;

use super::error::ValidationError;
use crate::domain::status::{WarningWindowPolicy, DEFAULT_WARNING_WINDOW_DAYS};

const MAX_WINDOW_DAYS: u32 = 365;

/// Warning windows for expiry classification
#[derive(Debug, Clone, Deserialize)]
pub struct ComplianceConfig {
    /// Days before expiry at which records show as expiring
    #[serde(default = "default_warning_window_days")]
    pub warning_window_days: u32,

    /// Per document type windows, e.g. `REPSE = 60`
    #[serde(default)]
    pub window_overrides: HashMap<String, u32>,

    /// DC-3 courses every worker must hold
    #[serde(default)]
    pub required_courses: Vec<String>,
}

impl ComplianceConfig {
    /// Build the classifier policy
    pub fn policy(&self) -> WarningWindowPolicy {
        self.window_overrides
            .iter()
            .fold(
                WarningWindowPolicy::new(self.warning_window_days),
                |policy, (document_type, days)| policy.with_override(document_type, *days),
            )
    }

    /// Validate compliance configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !valid_window(self.warning_window_days) {
            return Err(ValidationError::InvalidWarningWindow(
                self.warning_window_days,
            ));
        }
        if let Some((document_type, _)) = self
            .window_overrides
            .iter()
            .find(|(_, days)| !valid_window(**days))
        {
            return Err(ValidationError::InvalidWindowOverride(
                document_type.clone(),
            ));
        }
        Ok(())
    }
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            warning_window_days: default_warning_window_days(),
            window_overrides: HashMap::new(),
            required_courses: Vec::new(),
        }
    }
}

fn valid_window(days: u32) -> bool {
    (1..=MAX_WINDOW_DAYS).contains(&days)
}

fn default_warning_window_days() -> u32 {
    DEFAULT_WARNING_WINDOW_DAYS
}
