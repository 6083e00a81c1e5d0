//! Warning window configuration per document type.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Days before expiry at which a record starts showing as expiring.
pub const DEFAULT_WARNING_WINDOW_DAYS: u32 = 30;

/// Warning window with optional per-document-type overrides.
///
/// Document types are matched case-insensitively (`"repse"` and `"REPSE"`
/// share an override).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningWindowPolicy {
    default_days: u32,
    #[serde(default)]
    overrides: HashMap<String, u32>,
}

impl WarningWindowPolicy {
    /// Creates a policy with a single window for every document type.
    pub fn new(default_days: u32) -> Self {
        Self {
            default_days,
            overrides: HashMap::new(),
        }
    }

    /// Adds or replaces the window for one document type.
    pub fn with_override(mut self, document_type: &str, days: u32) -> Self {
        self.overrides.insert(normalize_key(document_type), days);
        self
    }

    /// Window applied to document types without an override.
    pub fn default_days(&self) -> u32 {
        self.default_days
    }

    /// Window for `document_type`.
    pub fn window_for(&self, document_type: &str) -> u32 {
        self.overrides
            .get(&normalize_key(document_type))
            .copied()
            .unwrap_or(self.default_days)
    }
}

impl Default for WarningWindowPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_WARNING_WINDOW_DAYS)
    }
}

impl<S: AsRef<str>> FromIterator<(S, u32)> for WarningWindowPolicy {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |policy, (key, days)| {
                policy.with_override(key.as_ref(), days)
            })
    }
}

fn normalize_key(document_type: &str) -> String {
    document_type.trim().to_uppercase()
}
