//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `status` - Expiry classification (vigente / por vencer / vencido)
//! - `aggregate` - Grouped counts, weighted sums, and percentages
//! - `compliance` - REPSE / SIROC / IMSS / STPS / SAT items
//! - `workforce` - DC-3 certifications per worker
//! - `legal` - Legal cases and exposure totals
//! - `packing` - Packing lists and spreadsheet import/export
//! - `draft` - Locally persisted work in progress

pub mod aggregate;
pub mod compliance;
pub mod draft;
pub mod foundation;
pub mod legal;
pub mod packing;
pub mod status;
pub mod workforce;
