//! Issue sources: where a run's rows come from.
//!
//! Sources do I/O only. Header-to-field mapping happens here so that later
//! stages only ever see [`IssueRow`]s.

pub mod auth;
pub mod csv;
pub mod sheets;

pub use self::csv::CsvSource;
pub use self::sheets::SheetsSource;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::issues::{Column, IssueRow};

/// A tabular data source of issue rows.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Short source name for logs (e.g. "sheets", "csv").
    fn name(&self) -> &str;

    /// Fetch every row, once. No retries: the scheduler re-runs the job.
    async fn fetch_rows(&self) -> Result<Vec<IssueRow>, SourceError>;
}

/// Map a header row plus data rows into issue rows.
///
/// Data rows may be shorter than the header (trailing empty cells are often
/// omitted); cells beyond the header are dropped. A tracked column named by
/// more than one header is ambiguous and rejects the whole table.
pub fn rows_from_table<H, R>(headers: &[H], rows: R) -> Result<Vec<IssueRow>, SourceError>
where
    H: AsRef<str>,
    R: IntoIterator<Item = Vec<String>>,
{
    let mut seen = HashSet::new();
    for column in headers.iter().filter_map(|h| Column::from_header(h.as_ref())) {
        if !seen.insert(column) {
            return Err(SourceError::Decode(format!(
                "header row repeats column {:?}",
                column.header()
            )));
        }
    }

    Ok(rows
        .into_iter()
        .map(|cells| {
            let mut cells = cells.into_iter();
            IssueRow::from_record(
                headers
                    .iter()
                    .map(|h| (h.as_ref(), cells.next().unwrap_or_default())),
            )
        })
        .collect())
}
