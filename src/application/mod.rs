//! Application layer - orchestrates domain operations over ports.

pub mod drafts;
mod operations_report;

pub use drafts::{DraftStore, DraftStoreError, ExternalChange};
pub use operations_report::{
    BuildOperationsReportHandler, HearingStatus, OperationsReport, OperationsSnapshot,
    ReportParseError, HEARING_DOCUMENT_TYPE,
};
