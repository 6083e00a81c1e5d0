//! Per-worker certification roll-up.

use serde::Serialize;
use std::collections::HashMap;

use super::Dc3Certification;
use crate::domain::foundation::Timestamp;
use crate::domain::status::{ExpiryStatus, StatusClassifier, StatusTally};

/// Certification state of one worker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerStatus {
    pub worker_id: String,
    pub worker_name: String,
    /// Worst status across the worker's certificates and required courses.
    pub status: ExpiryStatus,
    /// Days until the nearest readable expiry.
    pub nearest_expiry_days: Option<i64>,
    /// Courses that are expiring, expired, unreadable, or not on file.
    pub courses_needing_attention: Vec<String>,
}

/// Certification status for every worker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerCertificationReport {
    pub workers: Vec<WorkerStatus>,
    /// Counts of workers by their worst status.
    pub tally: StatusTally,
}

impl WorkerCertificationReport {
    /// Builds the report.
    ///
    /// Workers appear in the order their first certificate appears. A
    /// course listed in `required_courses` that a worker has no
    /// certificate for counts as `Missing` for that worker.
    pub fn build(
        certifications: &[Dc3Certification],
        required_courses: &[String],
        classifier: &StatusClassifier,
        now: &Timestamp,
    ) -> Self {
        let mut order: Vec<&str> = Vec::new();
        let mut by_worker: HashMap<&str, Vec<&Dc3Certification>> = HashMap::new();
        for cert in certifications {
            by_worker
                .entry(cert.worker_id.as_str())
                .or_insert_with(|| {
                    order.push(cert.worker_id.as_str());
                    Vec::new()
                })
                .push(cert);
        }

        let workers: Vec<WorkerStatus> = order
            .into_iter()
            .filter_map(|worker_id| {
                let certs = by_worker.get(worker_id)?;
                Some(worker_status(certs, required_courses, classifier, now))
            })
            .collect();

        let tally = StatusTally::from_statuses(workers.iter().map(|w| w.status));
        Self { workers, tally }
    }

    /// Looks up one worker.
    pub fn worker(&self, worker_id: &str) -> Option<&WorkerStatus> {
        self.workers.iter().find(|w| w.worker_id == worker_id)
    }
}

fn worker_status(
    certs: &[&Dc3Certification],
    required_courses: &[String],
    classifier: &StatusClassifier,
    now: &Timestamp,
) -> WorkerStatus {
    let mut statuses = Vec::with_capacity(certs.len());
    let mut nearest_expiry_days: Option<i64> = None;
    let mut courses_needing_attention = Vec::new();

    for cert in certs {
        let classification = classifier.classify_record(*cert, now);
        if let Some(days) = classification.days_remaining {
            nearest_expiry_days = Some(nearest_expiry_days.map_or(days, |d| d.min(days)));
        }
        if classification.status.needs_attention() {
            courses_needing_attention.push(cert.course.clone());
        }
        statuses.push(classification.status);
    }

    for course in required_courses {
        let held = certs
            .iter()
            .any(|cert| cert.course.trim().eq_ignore_ascii_case(course.trim()));
        if !held {
            statuses.push(ExpiryStatus::Missing);
            courses_needing_attention.push(course.clone());
        }
    }

    WorkerStatus {
        worker_id: certs[0].worker_id.clone(),
        worker_name: certs[0].worker_name.clone(),
        status: ExpiryStatus::worst(statuses).unwrap_or(ExpiryStatus::Missing),
        nearest_expiry_days,
        courses_needing_attention,
    }
}
