//! Core domain logic for Carnet, a personal note-capture engine.
//! This crate is the single source of truth for the capture grammar and
//! storage invariants.

pub mod archive;
pub mod dispatch;
pub mod logging;
pub mod model;
pub mod observer;
pub mod parser;
pub mod search;
pub mod store;

pub use archive::AttachmentArchiver;
pub use dispatch::{CommandDispatcher, DispatchError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{Entry, NoteLog, LOG_DATE_FORMAT};
pub use observer::{CollectObserver, MessageObserver, OBSERVER_PREFIX};
pub use parser::{parse_message, ParsedMessage};
pub use search::SearchEngine;
pub use store::{NoteLogStore, SearchOutcome, StoreError, StoreResult, SEARCH_RESULT_CAP};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
