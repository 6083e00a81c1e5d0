//! Status counts over a collection of classifications.

use serde::Serialize;

use super::ExpiryStatus;
use crate::domain::aggregate::{reduce, AggregateReport, QuantifiableItem};
use crate::domain::foundation::Percentage;

/// How many records landed in each status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusTally {
    pub valid: usize,
    pub expiring: usize,
    pub expired: usize,
    pub missing: usize,
}

impl StatusTally {
    /// Counts `statuses`.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = ExpiryStatus>,
    {
        statuses.into_iter().fold(Self::default(), |mut tally, status| {
            tally.record(status);
            tally
        })
    }

    /// Adds one status.
    pub fn record(&mut self, status: ExpiryStatus) {
        match status {
            ExpiryStatus::Valid => self.valid += 1,
            ExpiryStatus::Expiring => self.expiring += 1,
            ExpiryStatus::Expired => self.expired += 1,
            ExpiryStatus::Missing => self.missing += 1,
        }
    }

    /// Count for one status.
    pub fn count(&self, status: ExpiryStatus) -> usize {
        match status {
            ExpiryStatus::Valid => self.valid,
            ExpiryStatus::Expiring => self.expiring,
            ExpiryStatus::Expired => self.expired,
            ExpiryStatus::Missing => self.missing,
        }
    }

    /// Number of records counted.
    pub fn total(&self) -> usize {
        self.valid + self.expiring + self.expired + self.missing
    }

    /// Share of records that are valid, taken from [`Self::breakdown`].
    pub fn compliance_rate(&self) -> Percentage {
        let breakdown = self.breakdown();
        breakdown
            .group(&ExpiryStatus::Valid.to_string())
            .map(|group| group.percentage)
            .unwrap_or_else(|| Percentage::of(0.0, breakdown.grand_total_value))
    }

    /// Share per status, in severity order, skipping empty statuses.
    pub fn breakdown(&self) -> AggregateReport {
        let items: Vec<QuantifiableItem> = ExpiryStatus::ALL
            .iter()
            .filter(|status| self.count(**status) > 0)
            .map(|status| QuantifiableItem::new(status.to_string(), self.count(*status) as f64, 1.0))
            .collect();
        reduce(&items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_status() {
        let tally = StatusTally::from_statuses([
            ExpiryStatus::Valid,
            ExpiryStatus::Valid,
            ExpiryStatus::Expired,
            ExpiryStatus::Missing,
        ]);
        assert_eq!(tally.valid, 2);
        assert_eq!(tally.expired, 1);
        assert_eq!(tally.missing, 1);
        assert_eq!(tally.expiring, 0);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn compliance_rate_is_valid_share() {
        let tally = StatusTally::from_statuses([
            ExpiryStatus::Valid,
            ExpiryStatus::Valid,
            ExpiryStatus::Valid,
            ExpiryStatus::Expiring,
        ]);
        assert_eq!(tally.compliance_rate().to_string(), "75.00%");
    }

    #[test]
    fn rate_without_valid_records_is_zero_percent() {
        let tally = StatusTally::from_statuses([ExpiryStatus::Expired, ExpiryStatus::Missing]);
        assert_eq!(tally.compliance_rate().to_string(), "0.00%");
    }

    #[test]
    fn empty_tally_rate_is_zero() {
        assert_eq!(StatusTally::default().compliance_rate().to_string(), "0%");
    }

    #[test]
    fn breakdown_lists_non_empty_statuses() {
        let tally = StatusTally::from_statuses([ExpiryStatus::Expired, ExpiryStatus::Valid]);
        let report = tally.breakdown();
        let categories: Vec<_> = report.groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["VALID", "EXPIRED"]);
        assert_eq!(report.group("EXPIRED").unwrap().percentage.to_string(), "50.00%");
    }
}
