//! Workforce module - DC-3 certification tracking per worker.

mod certification;
mod report;

pub use certification::{Dc3Certification, DC3_DOCUMENT_TYPE};
pub use report::{WorkerCertificationReport, WorkerStatus};
