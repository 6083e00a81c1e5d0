//! Legal cases and their disputed amounts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::aggregate::Quantifiable;
use crate::domain::foundation::LenientNumber;

/// Procedural state of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Open,
    InLitigation,
    Settled,
    Closed,
}

impl CaseStatus {
    /// Returns true while the amount is still at stake.
    pub fn is_active(&self) -> bool {
        matches!(self, CaseStatus::Open | CaseStatus::InLitigation)
    }

    /// Spanish label shown on the legal screen.
    pub fn label(&self) -> &'static str {
        match self {
            CaseStatus::Open => "Abierto",
            CaseStatus::InLitigation => "En litigio",
            CaseStatus::Settled => "Convenio",
            CaseStatus::Closed => "Cerrado",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A labor, civil, or tax case the company is party to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalCase {
    pub id: String,
    pub case_number: String,
    pub counterparty: String,
    /// Amount in dispute, MXN. Accepts numbers or formatted text.
    #[serde(default)]
    pub disputed_amount: LenientNumber,
    pub status: CaseStatus,
    #[serde(default)]
    pub next_hearing: Option<String>,
}

impl Quantifiable for LegalCase {
    fn category(&self) -> Option<&str> {
        Some(self.status.label())
    }

    fn quantity(&self) -> f64 {
        1.0
    }

    fn unit_value(&self) -> f64 {
        self.disputed_amount.value_or_zero()
    }
}
