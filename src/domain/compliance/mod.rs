//! Compliance module - REPSE / SIROC / IMSS / STPS / SAT tracking.

mod compliance_item;
mod registry;
mod summary;

pub use compliance_item::{ComplianceItem, DeclaredStatus};
pub use registry::Registry;
pub use summary::{ComplianceSummary, EvaluatedItem, RegistrySummary};
