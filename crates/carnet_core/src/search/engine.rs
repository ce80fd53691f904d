//! User-facing search formatting over the log store.
//!
//! # Responsibility
//! - Distinguish "no log", "no matches" and "matches" for reply formatting.
//!
//! Only entry bodies are searched; tags and category markers are not
//! searchable text.

use crate::store::{NoteLogStore, SearchOutcome};

/// Thin orchestration over [`NoteLogStore::search`].
pub struct SearchEngine<'store> {
    store: &'store NoteLogStore,
}

impl<'store> SearchEngine<'store> {
    pub fn new(store: &'store NoteLogStore) -> Self {
        Self { store }
    }

    /// Runs one search and renders the user-facing reply.
    pub fn run(&self, user_id: &str, pattern: &str) -> String {
        match self.store.search(user_id, pattern) {
            SearchOutcome::NoLog => "No notes recorded.".to_string(),
            SearchOutcome::Matches(matches) if matches.is_empty() => {
                "No results found.".to_string()
            }
            SearchOutcome::Matches(matches) => {
                format!(
                    "Search results ({} found):\n{}",
                    matches.len(),
                    matches.join("\n")
                )
            }
        }
    }
}
