//! Metadata extraction over raw message text.
//!
//! # Responsibility
//! - Turn one raw inbound message into tags, category, trailing URL and a
//!   cleaned body.
//!
//! # Invariants
//! - Only markers at the very start of the first line are extracted; later
//!   markers stay literal in the body.
//! - An unclosed `#` or `$` is never consumed by the marker scan.
//! - Only a URL at the very end of the whole body is extracted; earlier URLs
//!   stay embedded.
//! - Parsing is pure: no I/O, no clock, no logging.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:#[^#\n]*# )*").expect("valid tag run regex"));
static TAG_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([^#\n]*)#").expect("valid tag token regex"));
static CATEGORY_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\$[^$\n]*\$ )*").expect("valid category run regex"));
static CATEGORY_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([^$\n]*)\$").expect("valid category token regex"));
static TRAILING_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(https?://\S+)$").expect("valid trailing url regex"));

/// Structured view of one raw message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    /// Leading `#tag#` contents, in order. Empty when none matched.
    pub tags: Vec<String>,
    /// Leading `$cat$` contents; `None` when the run matched nothing.
    pub category: Option<Vec<String>>,
    /// Trailing URL, removed from `body` when present.
    pub url: Option<String>,
    /// Cleaned message text.
    pub body: String,
}

/// Parses one raw message into tags, category, trailing URL and body.
pub fn parse_message(raw: &str) -> ParsedMessage {
    let (first_line, rest) = match raw.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (raw, ""),
    };

    // A trailing space lets the run regexes treat the final marker uniformly;
    // the reassembly trim below absorbs it again.
    let mut first_line = format!("{first_line} ");

    let (tags, remainder) = consume_marker_run(&first_line, &TAG_RUN_RE, &TAG_TOKEN_RE);
    first_line = remainder;

    let (categories, remainder) =
        consume_marker_run(&first_line, &CATEGORY_RUN_RE, &CATEGORY_TOKEN_RE);
    first_line = remainder;
    let category = if categories.is_empty() {
        None
    } else {
        Some(categories)
    };

    let mut body = format!("{}\n{}", first_line.trim(), rest.trim())
        .trim()
        .to_string();

    let url_hit = TRAILING_URL_RE
        .find(&body)
        .map(|hit| (hit.start(), hit.as_str().to_string()));
    let url = url_hit.map(|(start, url)| {
        body.truncate(start);
        body = body.trim().to_string();
        url
    });

    ParsedMessage {
        tags,
        category,
        url,
        body,
    }
}

/// Consumes a leading run of delimiter-wrapped tokens from `line`, returning
/// the token contents and the unconsumed remainder.
fn consume_marker_run(line: &str, run_re: &Regex, token_re: &Regex) -> (Vec<String>, String) {
    let Some(run) = run_re.find(line) else {
        return (Vec::new(), line.to_string());
    };
    if run.is_empty() {
        return (Vec::new(), line.to_string());
    }

    let tokens = token_re
        .captures_iter(run.as_str())
        .map(|caps| caps[1].to_string())
        .collect();
    (tokens, line[run.end()..].to_string())
}
