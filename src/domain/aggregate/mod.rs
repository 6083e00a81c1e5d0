//! Aggregate module - grouped counts, weighted sums, and percentages.
//!
//! Packing list summaries and legal exposure totals both reduce through
//! [`reduce`]; domain records implement [`Quantifiable`] to take part.

mod quantifiable;
mod reducer;

pub use quantifiable::{Quantifiable, QuantifiableItem, UNCATEGORIZED};
pub use reducer::{reduce, AggregateReport, GroupSummary};
