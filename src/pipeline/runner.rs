//! Issue reminder runner: one pass of load → filter → extract → render → deliver.
//!
//! Every stage failure is caught here and turned into a [`RunOutcome`];
//! nothing past this boundary sees an error from a run.

use tracing::{debug, error, info};

use crate::config::{ReminderConfig, SourceConfig};
use crate::error::{DeliveryError, Result};
use crate::issues::{extract_recipients, filter_open};
use crate::notify::{Notifier, SmtpNotifier};
use crate::pipeline::outcome::RunOutcome;
use crate::report::{REMINDER_SUBJECT, Report};
use crate::source::{CsvSource, IssueSource, SheetsSource};

/// The reminder job: one source, one notifier, no state between runs.
pub struct IssueReminder {
    source: Box<dyn IssueSource>,
    notifier: Box<dyn Notifier>,
}

impl IssueReminder {
    pub fn new(source: Box<dyn IssueSource>, notifier: Box<dyn Notifier>) -> Self {
        Self { source, notifier }
    }

    /// Wire the configured source and the SMTP notifier.
    pub fn from_config(config: &ReminderConfig) -> Result<Self> {
        let source: Box<dyn IssueSource> = match &config.source {
            SourceConfig::Sheets(sheets) => Box::new(SheetsSource::new(sheets.clone())?),
            SourceConfig::Csv { path } => Box::new(CsvSource::new(path.clone())),
        };
        let notifier = Box::new(SmtpNotifier::new(&config.smtp)?);
        Ok(Self::new(source, notifier))
    }

    /// Run the pipeline once and return how it ended.
    pub async fn run(&self) -> RunOutcome {
        // LOAD
        let rows = match self.source.fetch_rows().await {
            Ok(rows) => rows,
            Err(e) => {
                error!(source = self.source.name(), "Issue source error: {e}");
                return RunOutcome::SourceError(e.to_string());
            }
        };
        debug!(source = self.source.name(), rows = rows.len(), "Loaded issue rows");

        // FILTER
        let open = filter_open(&rows);
        if open.is_empty() {
            return RunOutcome::NoOpenIssues;
        }

        // EXTRACT
        let recipients = extract_recipients(&open);
        if recipients.is_empty() {
            return RunOutcome::NoRecipients { open: open.len() };
        }

        // RENDER
        let report = Report::render(&open);

        // DELIVER
        info!(
            notifier = self.notifier.name(),
            open = open.len(),
            recipients = recipients.len(),
            "Sending open issue reminder"
        );
        match self
            .notifier
            .deliver(&recipients, REMINDER_SUBJECT, &report.text, &report.html)
            .await
        {
            Ok(()) => RunOutcome::Sent {
                open: open.len(),
                recipients: recipients.len(),
            },
            Err(DeliveryError::TaskFailed(cause)) => {
                error!("Delivery task failed: {cause}");
                RunOutcome::ScriptError(cause)
            }
            Err(e) => {
                error!(notifier = self.notifier.name(), "Delivery error: {e}");
                RunOutcome::DeliveryError {
                    open: open.len(),
                    recipients: recipients.len(),
                    cause: e.to_string(),
                }
            }
        }
    }
}
