//! Issue Reminder: emails service owners a summary of their open issues.

pub mod config;
pub mod error;
pub mod issues;
pub mod logging;
pub mod notify;
pub mod pipeline;
pub mod report;
pub mod source;
