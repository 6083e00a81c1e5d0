//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Identifier of a persisted draft.
///
/// Callers may supply their own identifiers (legacy drafts used
/// time-based strings), so this wraps an arbitrary non-empty string.
/// Freshly synthesized ids are UUID v4.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DraftId(String);

impl DraftId {
    /// Creates a new random DraftId.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates a DraftId from a caller-supplied string.
    pub fn try_from_string(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("id"));
        }
        Ok(Self(value))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DraftId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_string(s)
    }
}

impl TryFrom<String> for DraftId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from_string(value)
    }
}

impl From<DraftId> for String {
    fn from(id: DraftId) -> Self {
        id.0
    }
}

impl AsRef<str> for DraftId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Handle returned when registering an external change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListenerId(Uuid);

impl ListenerId {
    /// Creates a new random ListenerId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_id_new_generates_unique_ids() {
        assert_ne!(DraftId::new(), DraftId::new());
    }

    #[test]
    fn draft_id_new_is_a_uuid() {
        let id = DraftId::new();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn draft_id_accepts_legacy_time_based_ids() {
        let id: DraftId = "1712345678901".parse().unwrap();
        assert_eq!(id.as_str(), "1712345678901");
    }

    #[test]
    fn draft_id_rejects_blank_strings() {
        assert!(DraftId::try_from_string("   ").is_err());
        assert!("".parse::<DraftId>().is_err());
    }

    #[test]
    fn draft_id_serializes_as_plain_string() {
        let id = DraftId::try_from_string("draft-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"draft-1\"");
    }

    #[test]
    fn draft_id_deserialization_rejects_blank_ids() {
        assert!(serde_json::from_str::<DraftId>("\"\"").is_err());
        assert!(serde_json::from_str::<DraftId>("\"  \"").is_err());

        let id: DraftId = serde_json::from_str("\"1712345678901\"").unwrap();
        assert_eq!(id.as_str(), "1712345678901");
    }

    #[test]
    fn listener_ids_are_unique() {
        assert_ne!(ListenerId::new(), ListenerId::new());
    }
}
