//! Inbound message metadata grammar.
//!
//! # Responsibility
//! - Extract leading tag/category markers and a trailing URL from raw text.

pub mod metadata;

pub use metadata::{parse_message, ParsedMessage};
