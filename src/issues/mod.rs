//! Issue rows and the pure selection stages run over them.

pub mod filter;
pub mod model;

pub use filter::{extract_recipients, filter_open};
pub use model::{Column, IssueRow, OPEN_STATUS};
