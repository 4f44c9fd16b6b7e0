//! Notification events
//!
//! The editor never renders anything itself; outcomes are surfaced as
//! notification events for an external display mechanism (toast, status
//! line, test harness). Delivery is a fire-and-forget channel send.

use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Notification severity
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Info,
    Error,
}

/// A user-facing notification event.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notification {
    pub variant: NotificationVariant,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: NotificationVariant::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: NotificationVariant::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Sending half of the notification channel handed to the editor.
///
/// Sends are ignored once the receiver is gone; a headless embedder may
/// simply drop it.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: UnboundedSender<Notification>,
}

impl Notifier {
    /// Create a notifier and the receiver the display mechanism drains.
    pub fn channel() -> (Self, UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn notify(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }

    pub fn info(&self, title: impl Into<String>, description: impl Into<String>) {
        self.notify(Notification::info(title, description));
    }

    pub fn error(&self, title: impl Into<String>, description: impl Into<String>) {
        self.notify(Notification::error(title, description));
    }
}
