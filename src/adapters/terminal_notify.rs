//! Terminal notification delivery.
//!
//! Prints notifications to stderr so they stay visible next to command
//! output. Delivery never blocks and never fails.

use tracing::debug;

use crate::session::notifications::NotificationKind;
use crate::traits::{Notifier, NotificationLevel};

/// Notifier that writes to the terminal.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, kind: NotificationKind, level: NotificationLevel, message: &str) {
        debug!(kind = kind.key(), "Delivering notification");
        let marker = match level {
            NotificationLevel::Success => "✓",
            NotificationLevel::Error => "✗",
        };
        eprintln!("{} {}", marker, message);
    }
}
