//! BuildOperationsReportHandler - runs every record through the status and
//! aggregate engine and assembles the dashboard report.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::aggregate::AggregateReport;
use crate::domain::compliance::{ComplianceItem, ComplianceSummary};
use crate::domain::foundation::{Clock, ParseError, Timestamp};
use crate::domain::legal::{upcoming_hearings, LegalCase, LegalExposure};
use crate::domain::packing::{CategoryCatalog, PackingList, PackingListItem};
use crate::domain::status::{Classification, StatusClassifier};
use crate::domain::workforce::{Dc3Certification, WorkerCertificationReport};

/// Warning window key for court hearings.
pub const HEARING_DOCUMENT_TYPE: &str = "HEARING";

/// Raw records as loaded from the API or local storage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationsSnapshot {
    #[serde(default)]
    pub compliance: Vec<ComplianceItem>,
    #[serde(default)]
    pub certifications: Vec<Dc3Certification>,
    #[serde(default)]
    pub legal_cases: Vec<LegalCase>,
    #[serde(default)]
    pub packing_items: Vec<PackingListItem>,
}

/// Hearing date classification for one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HearingStatus {
    pub case_id: String,
    #[serde(flatten)]
    pub classification: Classification,
}

/// A value that could not be read and was counted as missing or zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParseError {
    pub section: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    pub message: String,
}

impl ReportParseError {
    fn new(section: &'static str, record_id: Option<&String>, error: &ParseError) -> Self {
        Self {
            section,
            record_id: record_id.cloned(),
            message: error.to_string(),
        }
    }
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationsReport {
    pub evaluated_at: Timestamp,
    pub compliance: ComplianceSummary,
    pub certifications: WorkerCertificationReport,
    pub legal: LegalExposure,
    pub hearings: Vec<HearingStatus>,
    pub packing: AggregateReport,
    /// Every unreadable date, amount, or quantity behind the figures above.
    pub parse_errors: Vec<ReportParseError>,
}

/// Handler for building the operations report.
pub struct BuildOperationsReportHandler {
    classifier: StatusClassifier,
    required_courses: Vec<String>,
    catalog: CategoryCatalog,
    clock: Arc<dyn Clock>,
}

impl BuildOperationsReportHandler {
    pub fn new(
        classifier: StatusClassifier,
        required_courses: Vec<String>,
        catalog: CategoryCatalog,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            classifier,
            required_courses,
            catalog,
            clock,
        }
    }

    pub fn handle(&self, snapshot: OperationsSnapshot) -> OperationsReport {
        let now = self.clock.now();

        let compliance = ComplianceSummary::from_items(&snapshot.compliance, &self.classifier, &now);

        let certifications = WorkerCertificationReport::build(
            &snapshot.certifications,
            &self.required_courses,
            &self.classifier,
            &now,
        );

        let legal = LegalExposure::from_cases(&snapshot.legal_cases);
        let hearing_window = self.classifier.policy().window_for(HEARING_DOCUMENT_TYPE);
        let hearings: Vec<HearingStatus> =
            upcoming_hearings(&snapshot.legal_cases, hearing_window, &now)
                .into_iter()
                .map(|(case_id, classification)| HearingStatus {
                    case_id: case_id.to_string(),
                    classification,
                })
                .collect();

        let mut packing_list = PackingList {
            items: snapshot.packing_items,
            ..PackingList::default()
        };
        packing_list.normalize_categories(&self.catalog);
        let packing = packing_list.summary();

        let mut parse_errors = Vec::new();
        for item in &compliance.items {
            if let Some(error) = &item.classification.error {
                parse_errors.push(ReportParseError::new("compliance", Some(&item.id), error));
            }
        }
        for cert in &snapshot.certifications {
            if let Some(error) = self.classifier.classify_record(cert, &now).error {
                parse_errors.push(ReportParseError::new("certifications", Some(&cert.id), &error));
            }
        }
        for (case_id, error) in &legal.amount_errors {
            parse_errors.push(ReportParseError::new("legal", Some(case_id), error));
        }
        for hearing in &hearings {
            if let Some(error) = &hearing.classification.error {
                parse_errors.push(ReportParseError::new("hearings", Some(&hearing.case_id), error));
            }
        }
        for error in packing_list.parse_errors().iter().chain(&packing.errors) {
            parse_errors.push(ReportParseError::new("packing", None, error));
        }
        if !parse_errors.is_empty() {
            tracing::warn!(count = parse_errors.len(), "report built over unreadable values");
        }

        tracing::debug!(
            compliance_items = snapshot.compliance.len(),
            certifications = snapshot.certifications.len(),
            legal_cases = snapshot.legal_cases.len(),
            packing_items = packing_list.items.len(),
            "built operations report"
        );

        OperationsReport {
            evaluated_at: now,
            compliance,
            certifications,
            legal,
            hearings,
            packing,
            parse_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::FixedClock;
    use crate::domain::status::{ExpiryStatus, WarningWindowPolicy};
    use serde_json::json;

    fn handler(policy: WarningWindowPolicy) -> BuildOperationsReportHandler {
        let now = Timestamp::parse_date("now", "2024-06-01T12:00:00Z").unwrap();
        BuildOperationsReportHandler::new(
            StatusClassifier::new(policy),
            vec!["Altura".to_string()],
            CategoryCatalog::standard(),
            Arc::new(FixedClock::new(now)),
        )
    }

    fn snapshot() -> OperationsSnapshot {
        serde_json::from_value(json!({
            "compliance": [
                { "id": "repse", "registry": "REPSE", "name": "Registro REPSE",
                  "expiryDate": "2024-06-06", "declaredStatus": "vigente" }
            ],
            "certifications": [
                { "id": "c1", "workerId": "w1", "workerName": "Ana", "course": "Altura",
                  "expiryDate": "2025-01-01", "certificateFolio": "DC3-9" }
            ],
            "legalCases": [
                { "id": "l1", "caseNumber": "45/2024", "counterparty": "X",
                  "disputedAmount": "100,000", "status": "open", "nextHearing": "2024-06-20" }
            ],
            "packingItems": [
                { "description": "Tubo", "category": "tuberias", "quantity": 2, "unitWeightKg": 10 },
                { "description": "Válvula", "category": "VALVULA", "quantity": "1", "unitWeightKg": "5" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn builds_every_section() {
        let report = handler(WarningWindowPolicy::default()).handle(snapshot());

        assert_eq!(report.compliance.items[0].classification.status, ExpiryStatus::Expiring);
        assert_eq!(report.compliance.items[0].classification.days_remaining, Some(5));
        assert_eq!(report.certifications.workers[0].status, ExpiryStatus::Valid);
        assert_eq!(report.legal.total_disputed, 100_000.0);
        assert_eq!(report.packing.grand_total_value, 25.0);
        assert_eq!(report.packing.groups[0].category, "Tubería");
        assert_eq!(report.packing.groups[0].percentage.to_string(), "80.00%");
    }

    #[test]
    fn hearing_window_is_configurable() {
        let default_report = handler(WarningWindowPolicy::default()).handle(snapshot());
        assert_eq!(default_report.hearings[0].classification.status, ExpiryStatus::Expiring);

        let short = WarningWindowPolicy::default().with_override(HEARING_DOCUMENT_TYPE, 7);
        let report = handler(short).handle(snapshot());
        assert_eq!(report.hearings[0].case_id, "l1");
        assert_eq!(report.hearings[0].classification.status, ExpiryStatus::Valid);
    }

    #[test]
    fn empty_snapshot_yields_empty_report() {
        let report = handler(WarningWindowPolicy::default()).handle(OperationsSnapshot::default());
        assert!(report.compliance.items.is_empty());
        assert!(report.certifications.workers.is_empty());
        assert_eq!(report.legal.total_disputed, 0.0);
        assert!(report.packing.is_empty());
    }

    #[test]
    fn unreadable_values_are_listed_in_the_report() {
        let snapshot: OperationsSnapshot = serde_json::from_value(json!({
            "compliance": [
                { "id": "imss", "registry": "IMSS", "name": "Opinión IMSS",
                  "expiryDate": "31/12/2024", "documentUrl": "https://docs/imss.pdf" }
            ],
            "legalCases": [
                { "id": "l2", "caseNumber": "9/2024", "counterparty": "Y",
                  "disputedAmount": "por definir", "status": "open" }
            ],
            "packingItems": [
                { "description": "Tubo", "category": "Tubería", "quantity": "cuatro", "unitWeightKg": 10 }
            ]
        }))
        .unwrap();

        let report = handler(WarningWindowPolicy::default()).handle(snapshot);

        let sections: Vec<_> = report.parse_errors.iter().map(|e| e.section).collect();
        assert_eq!(sections, vec!["compliance", "legal", "packing"]);
        assert_eq!(report.parse_errors[0].record_id.as_deref(), Some("imss"));
        assert_eq!(report.parse_errors[1].record_id.as_deref(), Some("l2"));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("por definir"));
        assert!(json.contains("cuatro"));
        assert!(json.contains("31/12/2024"));
    }

    #[test]
    fn clean_snapshot_has_no_parse_errors() {
        let report = handler(WarningWindowPolicy::default()).handle(snapshot());
        assert!(report.parse_errors.is_empty());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["parseErrors"], json!([]));
    }

    #[test]
    fn report_serializes() {
        let report = handler(WarningWindowPolicy::default()).handle(snapshot());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["packing"]["grandTotalValue"], 25.0);
        assert_eq!(json["hearings"][0]["caseId"], "l1");
        assert_eq!(json["compliance"]["complianceRate"], "0.00%");
    }
}
