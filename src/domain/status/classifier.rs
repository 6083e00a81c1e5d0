//! Status Classifier - maps a tracked record and an evaluation instant to
//! exactly one [`ExpiryStatus`].
//!
//! Rules, evaluated in order:
//! 1. no record of compliance → `Missing`
//! 2. no expiry date → `Valid`
//! 3. days remaining below zero → `Expired`
//! 4. days remaining within the warning window → `Expiring`
//! 5. otherwise → `Valid`
//!
//! A date that cannot be parsed fails closed to `Missing` and the
//! [`ParseError`] travels with the result.

use serde::Serialize;

use super::{ExpiryStatus, Semaphore, WarningWindowPolicy};
use crate::domain::foundation::{Clock, ParseError, Timestamp};

/// An entity whose lifecycle ends at an expiry date.
pub trait TrackedRecord {
    /// Identifier, unique within its collection.
    fn id(&self) -> &str;

    /// Expiry as an ISO date or RFC 3339 instant, if tracked.
    fn expiry_date(&self) -> Option<&str>;

    /// Whether some proof (document, certificate, folio) backs the record.
    fn has_record_of_compliance(&self) -> bool;

    /// Key used to look up the warning window for this record.
    fn document_type(&self) -> &str {
        ""
    }
}

/// Result of classifying one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub status: ExpiryStatus,
    /// Whole days until expiry, rounded up. `None` without a readable date.
    pub days_remaining: Option<i64>,
    /// Set when the expiry date could not be read.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "display")]
    pub error: Option<ParseError>,
}

impl Classification {
    /// Badge colour for this classification.
    pub fn semaphore(&self) -> Semaphore {
        self.status.semaphore()
    }
}

fn display<S: serde::Serializer>(
    error: &Option<ParseError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => serializer.collect_str(error),
        None => serializer.serialize_none(),
    }
}

/// Classifies one record against `now`.
///
/// A blank `expiry_date` is treated the same as an absent one.
pub fn classify(
    expiry_date: Option<&str>,
    has_record_of_compliance: bool,
    warning_window_days: u32,
    now: &Timestamp,
) -> Classification {
    let parsed = expiry_date
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| Timestamp::parse_date("expiry_date", raw));

    let (days_remaining, error) = match parsed {
        None => (None, None),
        Some(Ok(expiry)) => (Some(expiry.days_from(now)), None),
        Some(Err(err)) => (None, Some(err)),
    };

    let status = if !has_record_of_compliance || error.is_some() {
        ExpiryStatus::Missing
    } else {
        match days_remaining {
            None => ExpiryStatus::Valid,
            Some(days) if days < 0 => ExpiryStatus::Expired,
            Some(days) if days <= i64::from(warning_window_days) => ExpiryStatus::Expiring,
            Some(_) => ExpiryStatus::Valid,
        }
    };

    Classification {
        status,
        days_remaining,
        error,
    }
}

/// Classifier bound to a warning window policy.
#[derive(Debug, Clone, Default)]
pub struct StatusClassifier {
    policy: WarningWindowPolicy,
}

impl StatusClassifier {
    /// Creates a classifier using `policy` to pick each record's window.
    pub fn new(policy: WarningWindowPolicy) -> Self {
        Self { policy }
    }

    /// Creates a classifier with one window for every document type.
    pub fn with_window(days: u32) -> Self {
        Self::new(WarningWindowPolicy::new(days))
    }

    /// Returns the policy in use.
    pub fn policy(&self) -> &WarningWindowPolicy {
        &self.policy
    }

    /// Classifies `record` against `now`.
    pub fn classify_record<R: TrackedRecord + ?Sized>(
        &self,
        record: &R,
        now: &Timestamp,
    ) -> Classification {
        let window = self.policy.window_for(record.document_type());
        classify(
            record.expiry_date(),
            record.has_record_of_compliance(),
            window,
            now,
        )
    }

    /// Classifies `record` against the clock's current instant.
    pub fn classify_record_at<R: TrackedRecord + ?Sized>(
        &self,
        record: &R,
        clock: &dyn Clock,
    ) -> Classification {
        self.classify_record(record, &clock.now())
    }

    /// Classifies every record, keeping input order.
    pub fn classify_all<'a, R, I>(&self, records: I, now: &Timestamp) -> Vec<(&'a str, Classification)>
    where
        R: TrackedRecord + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        records
            .into_iter()
            .map(|record| (record.id(), self.classify_record(record, now)))
            .collect()
    }
}
