//! Notifier: hands the rendered report to a mail transport.

pub mod smtp;

pub use smtp::SmtpNotifier;

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::DeliveryError;

/// Mail transport for the reminder.
///
/// One call sends exactly one message addressed to every recipient, with the
/// text and HTML bodies as alternatives. Any failure fails the whole send.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Transport name for logs (e.g. "smtp").
    fn name(&self) -> &str;

    /// Deliver the message. `recipients` must be non-empty.
    async fn deliver(
        &self,
        recipients: &BTreeSet<String>,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<(), DeliveryError>;
}
