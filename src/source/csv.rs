//! CSV file source: a local export of the issue sheet.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::issues::IssueRow;
use crate::source::{IssueSource, rows_from_table};

/// Reads issue rows from a CSV file whose first record is the header row.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse CSV text with a header row.
    pub fn parse<R: std::io::Read>(input: R) -> Result<Vec<IssueRow>, SourceError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record?.iter().map(str::to_string).collect::<Vec<_>>());
        }
        rows_from_table(&headers, records)
    }
}

#[async_trait]
impl IssueSource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    async fn fetch_rows(&self) -> Result<Vec<IssueRow>, SourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let rows = Self::parse(bytes.as_slice())?;
        tracing::debug!(path = %self.path.display(), rows = rows.len(), "Read CSV issues");
        Ok(rows)
    }
}
