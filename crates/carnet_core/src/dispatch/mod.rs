//! Command dispatch for inbound messages.
//!
//! # Responsibility
//! - Route one inbound message to search or capture.
//! - Compose the capture path: parse metadata, archive attachments, append.
//! - Carry the user-visible error taxonomy for rejected messages.
//!
//! # Invariants
//! - A rejected message (empty, missing search term) has no storage or
//!   archive side effects.
//! - A store write failure is surfaced as a distinguished error, never
//!   collapsed into a generic failure string.
//! - Attachment copy failures are non-fatal; a partial capture still
//!   confirms success.

use crate::archive::AttachmentArchiver;
use crate::model::Entry;
use crate::parser::parse_message;
use crate::search::SearchEngine;
use crate::store::{NoteLogStore, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Literal command prefix selecting search mode.
const SEARCH_PREFIX: &str = "s ";

/// Number of leading characters echoed in a capture confirmation.
const CONFIRMATION_SNIPPET_CHARS: usize = 10;

/// Dispatch-level error taxonomy.
///
/// `Display` renders the short user-facing string for each kind, so callers
/// can either branch on the kind or format it directly.
#[derive(Debug)]
pub enum DispatchError {
    /// The message was empty after trimming; nothing was stored.
    EmptyMessage,
    /// The search prefix was given without a term.
    SearchTermMissing,
    /// The entry could not be persisted.
    Store(StoreError),
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "Empty message."),
            Self::SearchTermMissing => write!(f, "Please provide a search term."),
            Self::Store(err) => write!(f, "Could not save the note: {err}"),
        }
    }
}

impl Error for DispatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for DispatchError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Routes inbound messages to search or capture.
pub struct CommandDispatcher {
    store: NoteLogStore,
    archiver: AttachmentArchiver,
}

impl CommandDispatcher {
    /// Creates a dispatcher over `data_root`: user documents live directly
    /// under it, archived attachments under `attachments/<user>/`.
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        let data_root = data_root.into();
        let archiver = AttachmentArchiver::new(data_root.join("attachments"));
        Self {
            store: NoteLogStore::new(data_root),
            archiver,
        }
    }

    /// The underlying store, exposed for host-side inspection and tests.
    pub fn store(&self) -> &NoteLogStore {
        &self.store
    }

    /// Handles one inbound message.
    ///
    /// Search when the trimmed text starts with `"s "`, capture otherwise.
    /// The capture path parses the full original text, so marker grammar
    /// still sees the message exactly as written.
    pub fn handle(
        &self,
        text: &str,
        user_id: &str,
        attachments: &[PathBuf],
    ) -> Result<String, DispatchError> {
        if text.trim().is_empty() {
            return Err(DispatchError::EmptyMessage);
        }

        // Prefix check runs on the start-trimmed text so a bare `"s "`
        // still routes to search and prompts for a term.
        if let Some(raw_term) = text.trim_start().strip_prefix(SEARCH_PREFIX) {
            let term = raw_term.trim();
            if term.is_empty() {
                return Err(DispatchError::SearchTermMissing);
            }
            return Ok(SearchEngine::new(&self.store).run(user_id, term));
        }

        self.capture(text, user_id, attachments)
    }

    /// Handles one inbound message and renders errors into the short reply
    /// string; the host never sees a raw internal error.
    pub fn respond(&self, text: &str, user_id: &str, attachments: &[PathBuf]) -> String {
        match self.handle(text, user_id, attachments) {
            Ok(reply) => reply,
            Err(err) => err.to_string(),
        }
    }

    fn capture(
        &self,
        text: &str,
        user_id: &str,
        attachments: &[PathBuf],
    ) -> Result<String, DispatchError> {
        let parsed = parse_message(text);
        let stored = self.archiver.archive(user_id, attachments);
        let entry = Entry::from_parsed(parsed, stored);
        self.store.append(user_id, entry)?;
        Ok(confirmation(text))
    }
}

fn confirmation(text: &str) -> String {
    let snippet: String = text.trim().chars().take(CONFIRMATION_SNIPPET_CHARS).collect();
    format!("'{snippet}...' saved.")
}
