//! Compliance items - registrations and filings with an expiry.

use serde::{Deserialize, Serialize};

use super::Registry;
use crate::domain::foundation::Timestamp;
use crate::domain::status::{Classification, ExpiryStatus, StatusClassifier, TrackedRecord};

/// Status as entered by the compliance team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredStatus {
    Vigente,
    PorVencer,
    Vencido,
    Pendiente,
}

/// One tracked registration, permit, or filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceItem {
    pub id: String,
    pub registry: Registry,
    pub name: String,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub declared_status: Option<DeclaredStatus>,
    #[serde(default)]
    pub document_url: Option<String>,
}

impl ComplianceItem {
    /// Returns true if a document is attached.
    pub fn has_document(&self) -> bool {
        self.document_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Classifies this item.
    ///
    /// The expiry date decides whenever it is present. Without one, a
    /// declared `vencido` or `por_vencer` is taken at its word instead of
    /// being reported as permanently valid.
    pub fn evaluate(&self, classifier: &StatusClassifier, now: &Timestamp) -> Classification {
        let mut classification = classifier.classify_record(self, now);

        let undated = classification.days_remaining.is_none() && classification.error.is_none();
        if undated && classification.status == ExpiryStatus::Valid {
            classification.status = match self.declared_status {
                Some(DeclaredStatus::Vencido) => ExpiryStatus::Expired,
                Some(DeclaredStatus::PorVencer) => ExpiryStatus::Expiring,
                _ => ExpiryStatus::Valid,
            };
        }

        classification
    }
}

impl TrackedRecord for ComplianceItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn expiry_date(&self) -> Option<&str> {
        self.expiry_date.as_deref()
    }

    /// A `vigente` declaration implies the proof is on file.
    fn has_record_of_compliance(&self) -> bool {
        self.has_document() || self.declared_status == Some(DeclaredStatus::Vigente)
    }

    fn document_type(&self) -> &str {
        self.registry.code()
    }
}
