//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the operations engine.

mod clock;
mod errors;
mod ids;
mod numbers;
mod percentage;
mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{serialize_messages, ParseError, ValidationError};
pub use ids::{DraftId, ListenerId};
pub use numbers::{lenient_amount, LenientNumber};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
