//! Draft aggregate - client-local work in progress.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::domain::foundation::{DraftId, Timestamp};

/// Discriminator for what a draft holds.
///
/// Stored as a SCREAMING_SNAKE_CASE string; kinds this crate does not know
/// are kept verbatim so older or newer screens can share a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DraftKind {
    PackingList,
    DailyReport,
    Other(String),
}

impl DraftKind {
    /// Stored form of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            DraftKind::PackingList => "PACKING_LIST",
            DraftKind::DailyReport => "DAILY_REPORT",
            DraftKind::Other(kind) => kind.as_str(),
        }
    }
}

impl From<String> for DraftKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PACKING_LIST" => DraftKind::PackingList,
            "DAILY_REPORT" => DraftKind::DailyReport,
            _ => DraftKind::Other(value),
        }
    }
}

impl From<DraftKind> for String {
    fn from(kind: DraftKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for DraftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a caller hands to `save`.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftInput {
    /// Existing draft to replace. `None` creates a new draft.
    pub id: Option<DraftId>,
    pub kind: DraftKind,
    pub payload: Value,
    pub metadata: Map<String, Value>,
}

impl DraftInput {
    /// Input for a brand new draft.
    pub fn new(kind: DraftKind, payload: Value) -> Self {
        Self {
            id: None,
            kind,
            payload,
            metadata: Map::new(),
        }
    }

    /// Targets an existing draft (or a caller-chosen id for a new one).
    pub fn with_id(mut self, id: DraftId) -> Self {
        self.id = Some(id);
        self
    }

    /// Adds one denormalized metadata field.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A persisted draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: DraftId,
    pub kind: DraftKind,
    created_at: Timestamp,
    last_modified_at: Timestamp,
    pub payload: Value,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Draft {
    /// Creates a draft first saved at `now`.
    pub fn create(id: DraftId, input: DraftInput, now: Timestamp) -> Self {
        Self {
            id,
            kind: input.kind,
            created_at: now,
            last_modified_at: now,
            payload: input.payload,
            metadata: input.metadata,
        }
    }

    /// Replaces contents, keeping the id and creation time.
    pub fn revise(&mut self, input: DraftInput, now: Timestamp) {
        self.kind = input.kind;
        self.payload = input.payload;
        self.metadata = input.metadata;
        self.last_modified_at = now;
    }

    /// When the draft was first saved. Never changes.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// When the draft was last saved.
    pub fn last_modified_at(&self) -> Timestamp {
        self.last_modified_at
    }

    /// Reads a metadata field as text.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }
}
