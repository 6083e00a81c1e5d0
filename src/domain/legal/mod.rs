//! Legal module - case tracking and exposure totals.

mod exposure;
mod legal_case;

pub use exposure::{upcoming_hearings, LegalExposure};
pub use legal_case::{CaseStatus, LegalCase};
