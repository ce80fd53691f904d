//! Keyword search over a user's note history.

pub mod engine;

pub use engine::SearchEngine;
