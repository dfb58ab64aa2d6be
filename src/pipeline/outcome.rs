//! Terminal outcome of a run and the single log line that records it.

use std::fmt;

/// How a run ended. Exactly one is produced per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The data source could not be read.
    SourceError(String),
    /// No row has status "Open".
    NoOpenIssues,
    /// Open issues exist but none carries an owner email.
    NoRecipients { open: usize },
    /// The reminder was handed to the transport.
    Sent { open: usize, recipients: usize },
    /// The transport rejected the message.
    DeliveryError {
        open: usize,
        recipients: usize,
        cause: String,
    },
    /// Unexpected internal failure.
    ScriptError(String),
}

impl RunOutcome {
    /// Short classification used as the `outcome` log field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SourceError(_) => "source-error",
            Self::NoOpenIssues => "no-open-issues",
            Self::NoRecipients { .. } => "no-recipients",
            Self::Sent { .. } => "sent",
            Self::DeliveryError { .. } => "delivery-error",
            Self::ScriptError(_) => "script-error",
        }
    }

    /// Whether the run ended on a failure rather than a normal short-circuit or send.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::SourceError(_) | Self::DeliveryError { .. } | Self::ScriptError(_)
        )
    }

    /// Emit the run's terminal log line.
    pub fn record(&self) {
        if self.is_failure() {
            tracing::warn!(target: "run", outcome = self.label(), "{}", self);
        } else {
            tracing::info!(target: "run", outcome = self.label(), "{}", self);
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceError(_) => f.write_str("source-error"),
            Self::NoOpenIssues => f.write_str("no-open-issues (count=0)"),
            Self::NoRecipients { open } => {
                write!(f, "no-recipients (count={open}, recipients=0)")
            }
            Self::Sent { open, recipients } => {
                write!(f, "sent (count={open}, recipients={recipients})")
            }
            Self::DeliveryError {
                open,
                recipients,
                cause,
            } => write!(
                f,
                "delivery-error (count={open}, recipients={recipients}): {cause}"
            ),
            Self::ScriptError(cause) => write!(f, "script-error: {cause}"),
        }
    }
}
