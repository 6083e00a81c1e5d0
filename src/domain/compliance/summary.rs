//! Compliance dashboard summary.

use serde::Serialize;

use super::{ComplianceItem, Registry};
use crate::domain::aggregate::AggregateReport;
use crate::domain::foundation::{Percentage, Timestamp};
use crate::domain::status::{Classification, ExpiryStatus, StatusClassifier, StatusTally};

/// One item with its evaluated status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedItem {
    pub id: String,
    pub registry: Registry,
    pub name: String,
    #[serde(flatten)]
    pub classification: Classification,
}

/// Status counts for one registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySummary {
    pub registry: Registry,
    pub tally: StatusTally,
    pub worst: ExpiryStatus,
}

/// Evaluated compliance items with overall and per-registry counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    pub items: Vec<EvaluatedItem>,
    pub tally: StatusTally,
    pub compliance_rate: Percentage,
    /// Share of items per status.
    pub breakdown: AggregateReport,
    pub by_registry: Vec<RegistrySummary>,
}

impl ComplianceSummary {
    /// Evaluates every item against `now`.
    ///
    /// Registries without items are left out of `by_registry`.
    pub fn from_items(
        items: &[ComplianceItem],
        classifier: &StatusClassifier,
        now: &Timestamp,
    ) -> Self {
        let evaluated: Vec<EvaluatedItem> = items
            .iter()
            .map(|item| EvaluatedItem {
                id: item.id.clone(),
                registry: item.registry,
                name: item.name.clone(),
                classification: item.evaluate(classifier, now),
            })
            .collect();

        let tally = StatusTally::from_statuses(evaluated.iter().map(|e| e.classification.status));

        let by_registry = Registry::ALL
            .into_iter()
            .filter_map(|registry| {
                let statuses: Vec<ExpiryStatus> = evaluated
                    .iter()
                    .filter(|e| e.registry == registry)
                    .map(|e| e.classification.status)
                    .collect();
                let worst = ExpiryStatus::worst(statuses.iter().copied())?;
                Some(RegistrySummary {
                    registry,
                    tally: StatusTally::from_statuses(statuses),
                    worst,
                })
            })
            .collect();

        Self {
            items: evaluated,
            compliance_rate: tally.compliance_rate(),
            breakdown: tally.breakdown(),
            tally,
            by_registry,
        }
    }

    /// Items that are not valid, worst first.
    pub fn needing_attention(&self) -> Vec<&EvaluatedItem> {
        let mut flagged: Vec<&EvaluatedItem> = self
            .items
            .iter()
            .filter(|e| e.classification.status.needs_attention())
            .collect();
        flagged.sort_by_key(|e| std::cmp::Reverse(e.classification.status.severity()));
        flagged
    }
}
