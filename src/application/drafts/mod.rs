//! Drafts - local persistence of work-in-progress documents.

mod draft_store;
mod external_change;

pub use draft_store::{DraftStore, DraftStoreError, EMPLOYEES, SYSTEM_DRAFTS, TRAININGS};
pub use external_change::{ExternalChange, ExternalChangeListeners};
