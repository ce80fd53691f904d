//! Entry domain model.
//!
//! # Responsibility
//! - Define the canonical persisted record for one captured message.
//! - Fix the on-disk timestamp format shared by every user document.
//!
//! # Invariants
//! - Entries are immutable once appended; the core never edits or removes
//!   persisted entries.
//! - `category` is `None` when the category grammar matched nothing, never
//!   an empty list. This is the authoritative schema; tag-only documents
//!   written by the older shape still deserialize because the field is
//!   optional.
//! - `url` and `attachments` are omitted from the document when absent.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::parser::ParsedMessage;

/// On-disk timestamp format, second precision.
pub const LOG_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One persisted, immutable record of a captured message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Capture time in the fixed document format.
    #[serde(with = "log_date")]
    pub date: NaiveDateTime,
    /// Leading `#tag#` tokens from the first line, in order. May be empty.
    pub tags: Vec<String>,
    /// Leading `$cat$` tokens scanned after the tag run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
    /// Cleaned body: markers and trailing URL stripped.
    pub message: String,
    /// Trailing URL extracted from the original text, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Stored attachment paths; omitted when nothing was archived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
}

impl Entry {
    /// Composes an entry from parsed metadata and archived attachment paths,
    /// stamped with the current local time.
    pub fn from_parsed(parsed: ParsedMessage, stored_attachments: Vec<String>) -> Self {
        // Second precision, matching the document format, so an entry
        // compares equal to its reloaded form.
        let now = Local::now().naive_local();
        Self {
            date: now.with_nanosecond(0).unwrap_or(now),
            tags: parsed.tags,
            category: parsed.category,
            message: parsed.body,
            url: parsed.url,
            attachments: if stored_attachments.is_empty() {
                None
            } else {
                Some(stored_attachments)
            },
        }
    }
}

/// One user's ordered log as materialized from storage.
///
/// `existed` and `recovered` let callers see the corrupt-store policy
/// (malformed document replaced by an empty log) instead of having it hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteLog {
    /// Entries in original append order.
    pub entries: Vec<Entry>,
    /// Whether a document was present on disk at all.
    pub existed: bool,
    /// Whether an unreadable or malformed document was replaced by an
    /// empty log during load.
    pub recovered: bool,
}

impl NoteLog {
    /// A log for a user with no prior document.
    pub fn absent() -> Self {
        Self {
            entries: Vec::new(),
            existed: false,
            recovered: false,
        }
    }
}

mod log_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::LOG_DATE_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(LOG_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, LOG_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
