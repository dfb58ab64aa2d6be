use std::process::ExitCode;

use issue_reminder::config::ReminderConfig;
use issue_reminder::logging;
use issue_reminder::pipeline::{IssueReminder, RunOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Install rustls crypto provider before any TLS usage
    let _ = rustls::crypto::ring::default_provider().install_default();

    // Configuration problems stop the process before any network access
    let config = match ReminderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _guard = logging::init(None);
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let _guard = match logging::init(config.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            let _guard = logging::init(None);
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let reminder = match IssueReminder::from_config(&config) {
        Ok(reminder) => reminder,
        Err(e) => {
            tracing::error!("Startup failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = match tokio::spawn(async move { reminder.run().await }).await {
        Ok(outcome) => outcome,
        Err(e) => RunOutcome::ScriptError(e.to_string()),
    };
    outcome.record();

    ExitCode::SUCCESS
}
