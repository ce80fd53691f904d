//! Host-facing observer boundary.
//!
//! # Responsibility
//! - Expose the narrow contract the external bot runtime registers against:
//!   a command prefix and a message handler returning a reply string.
//!
//! Subscription and delivery mechanics belong to the host runtime; the core
//! only answers messages already routed to it.

use crate::dispatch::CommandDispatcher;
use log::info;
use std::path::PathBuf;

/// Command prefix the host uses to route messages to this observer.
pub const OBSERVER_PREFIX: &str = "!c";

/// Contract between the host runtime and a message-handling plugin.
pub trait MessageObserver {
    /// Stable routing prefix declared to the host.
    fn prefix(&self) -> &'static str;

    /// Handles one inbound message and always returns a reply string.
    fn on_message(&self, text: &str, user_id: &str, attachments: &[PathBuf]) -> String;
}

/// The note-capture observer: wraps the dispatcher behind the host contract.
pub struct CollectObserver {
    dispatcher: CommandDispatcher,
}

impl CollectObserver {
    /// Creates the observer with its data root (user documents plus the
    /// attachment archive live under it).
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            dispatcher: CommandDispatcher::new(data_root),
        }
    }

    /// Access to the wrapped dispatcher.
    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }
}

impl MessageObserver for CollectObserver {
    fn prefix(&self) -> &'static str {
        OBSERVER_PREFIX
    }

    fn on_message(&self, text: &str, user_id: &str, attachments: &[PathBuf]) -> String {
        info!(
            "event=message_received module=observer user={user_id} attachments={}",
            attachments.len()
        );
        self.dispatcher.respond(text, user_id, attachments)
    }
}
