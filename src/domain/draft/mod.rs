//! Draft module - work-in-progress documents kept in local storage.

mod draft;

pub use draft::{Draft, DraftInput, DraftKind};
