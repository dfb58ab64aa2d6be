//! Issue aggregation and notification pipeline.
//!
//! A run flows through:
//! 1. `IssueSource::fetch_rows()`: load every row (I/O)
//! 2. `filter_open()`: keep rows whose status is exactly "Open"
//! 3. `extract_recipients()`: distinct non-empty owner emails
//! 4. `Report::render()`: plain text and HTML
//! 5. `Notifier::deliver()`: one message to every recipient (I/O)
//!
//! Each guard that fails ends the run with a [`RunOutcome`]; nothing is retried.

pub mod outcome;
pub mod runner;

pub use outcome::RunOutcome;
pub use runner::IssueReminder;
