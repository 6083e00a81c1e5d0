//! Status module - time-based classification of tracked records.
//!
//! Every screen that shows a vigente / por vencer / vencido badge goes
//! through [`classify`] or a [`StatusClassifier`]; thresholds live in a
//! [`WarningWindowPolicy`] instead of being repeated per screen.

mod classifier;
mod expiry_status;
mod policy;
mod tally;

pub use classifier::{classify, Classification, StatusClassifier, TrackedRecord};
pub use expiry_status::{ExpiryStatus, Semaphore};
pub use policy::{WarningWindowPolicy, DEFAULT_WARNING_WINDOW_DAYS};
pub use tally::StatusTally;
