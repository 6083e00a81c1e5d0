//! DC-3 training certificates.

use serde::{Deserialize, Serialize};

use crate::domain::status::TrackedRecord;

/// Warning window key for DC-3 certificates.
pub const DC3_DOCUMENT_TYPE: &str = "DC-3";

/// One DC-3 constancia de habilidades laborales held by a worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dc3Certification {
    pub id: String,
    pub worker_id: String,
    pub worker_name: String,
    pub course: String,
    #[serde(default)]
    pub issued_on: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Folio printed on the certificate. Absent until the DC-3 is issued.
    #[serde(default)]
    pub certificate_folio: Option<String>,
}

impl TrackedRecord for Dc3Certification {
    fn id(&self) -> &str {
        &self.id
    }

    fn expiry_date(&self) -> Option<&str> {
        self.expiry_date.as_deref()
    }

    fn has_record_of_compliance(&self) -> bool {
        self.certificate_folio
            .as_deref()
            .is_some_and(|folio| !folio.trim().is_empty())
    }

    fn document_type(&self) -> &str {
        DC3_DOCUMENT_TYPE
    }
}
