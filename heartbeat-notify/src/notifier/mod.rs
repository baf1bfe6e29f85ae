//! Outbound notifications.
//!
//! The monitor only knows about [`NotificationSink`]; delivery is best-effort
//! and failures are reported back to the caller for logging, never retried.

mod messages;
mod webhook;

use anyhow::Result;

pub use messages::{alive_message, stalled_message, truncate_content};
pub use webhook::{destination_label, WebhookSink, MAX_CONTENT_CHARS};

/// Something that can deliver a message to a destination
pub trait NotificationSink {
    fn deliver(&self, destination: &str, message: &str) -> Result<()>;
}

impl<T: NotificationSink + ?Sized> NotificationSink for Box<T> {
    fn deliver(&self, destination: &str, message: &str) -> Result<()> {
        (**self).deliver(destination, message)
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<T> {
    fn deliver(&self, destination: &str, message: &str) -> Result<()> {
        (**self).deliver(destination, message)
    }
}
