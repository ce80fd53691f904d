//! Domain model for captured notes.
//!
//! # Responsibility
//! - Define the persisted `Entry` record and the in-memory `NoteLog` view.

pub mod entry;

pub use entry::{Entry, NoteLog, LOG_DATE_FORMAT};
