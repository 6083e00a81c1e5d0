//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ParseError;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Immutable point in time, always UTC.
///
/// Serializes as an RFC 3339 string, which is the format stored drafts use
/// for `createdAt` and `lastModifiedAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Parses a calendar date or an RFC 3339 instant.
    ///
    /// Accepted forms:
    /// - `2024-06-30` (midnight UTC of that day)
    /// - `2024-06-30T12:00:00` (UTC)
    /// - `2024-06-30T12:00:00-06:00` (any offset)
    ///
    /// `field` names the input in the returned error.
    pub fn parse_date(field: &str, value: &str) -> Result<Self, ParseError> {
        let trimmed = value.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(naive.and_utc()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self(midnight.and_utc()));
            }
        }

        Err(ParseError::invalid_date(field, value))
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Whole days from `now` until this timestamp, rounded up.
    ///
    /// Partial days count as a full day, so an instant later today yields 0
    /// only once it is less than a day away and an instant earlier today
    /// yields 0 until a full day has passed.
    pub fn days_from(&self, now: &Timestamp) -> i64 {
        let millis = self.duration_since(now).num_milliseconds();
        // Integer division truncates toward zero, which is already the
        // ceiling for negative values.
        let days = millis / MILLIS_PER_DAY;
        if millis > 0 && millis % MILLIS_PER_DAY != 0 {
            days + 1
        } else {
            days
        }
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by adding the specified number of milliseconds.
    pub fn plus_millis(&self, millis: i64) -> Self {
        Self(self.0 + Duration::milliseconds(millis))
    }

    /// Formats the calendar date part as `YYYY-MM-DD`.
    pub fn to_date_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
