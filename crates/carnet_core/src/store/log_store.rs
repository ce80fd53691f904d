//! Per-user append-only log store.
//!
//! # Responsibility
//! - Load, append to and search one YAML document per user identifier.
//! - Serialize the whole read-modify-write append under a per-user lock.
//!
//! # Invariants
//! - Existing entries are never edited or removed; `append` only grows the
//!   collection.
//! - A missing document loads as an empty log; an unreadable or malformed
//!   document loads as an empty log with `recovered = true` (lossy, but
//!   flagged to the caller).
//! - The document is replaced via temp-file-then-rename so concurrent
//!   readers never observe a partial write.
//! - Concurrent appends for the same user are serialized; appends for
//!   different users never contend.

use crate::model::{Entry, NoteLog};
use log::warn;
use regex::RegexBuilder;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tempfile::NamedTempFile;

/// Maximum number of bodies returned by one search.
pub const SEARCH_RESULT_CAP: usize = 5;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error for the per-user log.
///
/// Only write-path failures exist: the read path recovers a malformed
/// document as an empty log instead of failing (see `NoteLog::recovered`).
#[derive(Debug)]
pub enum StoreError {
    /// The log collection could not be serialized to a document.
    Serialize(serde_yaml::Error),
    /// The rewritten document could not be persisted; the appended entry
    /// was not stored.
    WriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize note log: {err}"),
            Self::WriteFailure { path, source } => {
                write!(
                    f,
                    "failed to persist note log `{}`: {source}",
                    path.display()
                )
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::WriteFailure { source, .. } => Some(source),
        }
    }
}

/// Result of searching one user's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The user has no document at all.
    NoLog,
    /// Matching bodies in original entry order, capped at
    /// [`SEARCH_RESULT_CAP`]. May be empty.
    Matches(Vec<String>),
}

/// Per-user YAML-backed note log store.
pub struct NoteLogStore {
    data_dir: PathBuf,
    user_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl NoteLogStore {
    /// Creates a store rooted at `data_dir`. The directory itself is created
    /// lazily on first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Path of one user's document. User ids are opaque storage keys,
    /// assumed pre-validated by the host.
    pub fn user_file(&self, user_id: &str) -> PathBuf {
        self.data_dir.join(format!("{user_id}.yaml"))
    }

    /// Loads one user's log.
    ///
    /// Missing document: empty log, `existed = false`. Unreadable or
    /// malformed document: empty log with `recovered = true`, logged at
    /// warn level. This read path never fails.
    pub fn load(&self, user_id: &str) -> NoteLog {
        read_log(&self.user_file(user_id))
    }

    /// Appends one entry to a user's log.
    ///
    /// The whole load+push+write sequence runs under that user's lock, so
    /// two concurrent appends cannot lose an entry to a read-modify-write
    /// race. The document is rewritten in full and swapped in via rename.
    pub fn append(&self, user_id: &str, entry: Entry) -> StoreResult<()> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let path = self.user_file(user_id);
        let mut log = read_log(&path);
        log.entries.push(entry);

        let document = serde_yaml::to_string(&log.entries).map_err(StoreError::Serialize)?;
        write_document(&self.data_dir, &path, &document)
    }

    /// Searches one user's log bodies with a case-insensitive pattern.
    ///
    /// The pattern is compiled as a regex; a pattern that fails to compile
    /// is retried as an escaped literal substring. Matches are returned in
    /// original entry order, capped at [`SEARCH_RESULT_CAP`].
    pub fn search(&self, user_id: &str, pattern: &str) -> SearchOutcome {
        let log = self.load(user_id);
        if !log.existed {
            return SearchOutcome::NoLog;
        }

        let matcher = build_matcher(pattern);
        let matches = log
            .entries
            .iter()
            .filter(|entry| matcher.is_match(&entry.message))
            .map(|entry| entry.message.clone())
            .take(SEARCH_RESULT_CAP)
            .collect();
        SearchOutcome::Matches(matches)
    }

    fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut table = self
            .user_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            table
                .entry(user_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }
}

fn read_log(path: &Path) -> NoteLog {
    if !path.exists() {
        return NoteLog::absent();
    }

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(
                "event=log_load module=store status=recovered path={} reason=unreadable error={err}",
                path.display()
            );
            return NoteLog {
                entries: Vec::new(),
                existed: true,
                recovered: true,
            };
        }
    };

    match serde_yaml::from_str::<Vec<Entry>>(&raw) {
        Ok(entries) => NoteLog {
            entries,
            existed: true,
            recovered: false,
        },
        Err(err) => {
            warn!(
                "event=log_load module=store status=recovered path={} reason=malformed error={err}",
                path.display()
            );
            NoteLog {
                entries: Vec::new(),
                existed: true,
                recovered: true,
            }
        }
    }
}

fn write_document(data_dir: &Path, path: &Path, document: &str) -> StoreResult<()> {
    let write_failure = |source: std::io::Error| StoreError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(data_dir).map_err(write_failure)?;

    // Temp file lives in the data dir so the final rename stays on one
    // filesystem and is atomic.
    let mut tmp = NamedTempFile::new_in(data_dir).map_err(write_failure)?;
    std::io::Write::write_all(&mut tmp, document.as_bytes()).map_err(write_failure)?;
    tmp.persist(path)
        .map_err(|err| write_failure(err.error))?;
    Ok(())
}

fn build_matcher(pattern: &str) -> regex::Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|_| {
            RegexBuilder::new(&regex::escape(pattern))
                .case_insensitive(true)
                .build()
                .expect("escaped literal pattern always compiles")
        })
}
