//! Per-user note log persistence.
//!
//! # Responsibility
//! - Own one ordered YAML document per user identifier.
//! - Keep append-only semantics correct under concurrent use.

pub mod log_store;

pub use log_store::{NoteLogStore, SearchOutcome, StoreError, StoreResult, SEARCH_RESULT_CAP};
