//! MICSA OS operations engine
//!
//! Derives expiry statuses for compliance records and DC-3 certificates,
//! aggregates packing lists and legal exposure by category, and keeps
//! work-in-progress drafts in local storage.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
