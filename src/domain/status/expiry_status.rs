//! ExpiryStatus enum and its traffic-light rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Time-based lifecycle status of a tracked record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryStatus {
    Valid,
    Expiring,
    Expired,
    Missing,
}

/// Traffic-light colour shown next to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Semaphore {
    Green,
    Yellow,
    Red,
    /// Neutral badge for records without proof or with unreadable dates.
    Gray,
}

impl ExpiryStatus {
    /// All statuses, best first.
    pub const ALL: [ExpiryStatus; 4] = [
        ExpiryStatus::Valid,
        ExpiryStatus::Expiring,
        ExpiryStatus::Expired,
        ExpiryStatus::Missing,
    ];

    /// Rank used to pick the worst of several statuses. Higher is worse.
    pub fn severity(&self) -> u8 {
        match self {
            ExpiryStatus::Valid => 0,
            ExpiryStatus::Expiring => 1,
            ExpiryStatus::Expired => 2,
            ExpiryStatus::Missing => 3,
        }
    }

    /// Returns the worst status in `statuses`, or `None` when empty.
    pub fn worst<I>(statuses: I) -> Option<ExpiryStatus>
    where
        I: IntoIterator<Item = ExpiryStatus>,
    {
        statuses.into_iter().max_by_key(ExpiryStatus::severity)
    }

    /// Returns true if the record needs no action.
    pub fn is_valid(&self) -> bool {
        matches!(self, ExpiryStatus::Valid)
    }

    /// Returns true if the record needs attention now or soon.
    pub fn needs_attention(&self) -> bool {
        !self.is_valid()
    }

    /// Colour of the badge for this status.
    pub fn semaphore(&self) -> Semaphore {
        match self {
            ExpiryStatus::Valid => Semaphore::Green,
            ExpiryStatus::Expiring => Semaphore::Yellow,
            ExpiryStatus::Expired => Semaphore::Red,
            ExpiryStatus::Missing => Semaphore::Gray,
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExpiryStatus::Valid => "VALID",
            ExpiryStatus::Expiring => "EXPIRING",
            ExpiryStatus::Expired => "EXPIRED",
            ExpiryStatus::Missing => "MISSING",
        };
        write!(f, "{}", s)
    }
}
