//! Legal exposure totals.

use serde::Serialize;

use super::LegalCase;
use crate::domain::aggregate::{reduce, AggregateReport};
use crate::domain::foundation::{ParseError, Timestamp};
use crate::domain::status::{classify, Classification};

/// Money at stake across all cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalExposure {
    pub case_count: usize,
    pub active_case_count: usize,
    pub total_disputed: f64,
    pub active_disputed: f64,
    /// Disputed amount per case status.
    pub by_status: AggregateReport,
    /// Cases whose amount could not be read, counted as zero.
    #[serde(skip)]
    pub amount_errors: Vec<(String, ParseError)>,
}

impl LegalExposure {
    /// Sums disputed amounts over `cases`.
    pub fn from_cases(cases: &[LegalCase]) -> Self {
        let by_status = reduce(cases);
        let active: Vec<&LegalCase> = cases.iter().filter(|c| c.status.is_active()).collect();
        let active_disputed = reduce(active.iter().copied()).grand_total_value;

        let amount_errors = cases
            .iter()
            .filter_map(|case| {
                let (_, err) = case.disputed_amount.resolve("disputed_amount");
                err.map(|err| (case.id.clone(), err))
            })
            .collect();

        Self {
            case_count: cases.len(),
            active_case_count: active.len(),
            total_disputed: by_status.grand_total_value,
            active_disputed,
            by_status,
            amount_errors,
        }
    }
}

/// Classifies upcoming hearings of active cases.
///
/// A hearing date in the past shows as expired, one inside the window as
/// expiring. Cases without a hearing are skipped.
pub fn upcoming_hearings<'a>(
    cases: &'a [LegalCase],
    warning_window_days: u32,
    now: &Timestamp,
) -> Vec<(&'a str, Classification)> {
    cases
        .iter()
        .filter(|case| case.status.is_active())
        .filter_map(|case| {
            let hearing = case.next_hearing.as_deref()?;
            Some((
                case.id.as_str(),
                classify(Some(hearing), true, warning_window_days, now),
            ))
        })
        .collect()
}
