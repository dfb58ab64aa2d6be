//! Google Sheets source: reads the first worksheet of a spreadsheet.
//!
//! Flow per fetch: service-account token exchange, spreadsheet lookup by name
//! through Drive (unless an ID is configured), first worksheet title, then
//! the worksheet's formatted values. One attempt, no retries.

use async_trait::async_trait;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::SheetsConfig;
use crate::error::SourceError;
use crate::issues::IssueRow;
use crate::source::auth::SHEETS_SCOPES;
use crate::source::{IssueSource, rows_from_table};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/";
const DRIVE_API_BASE: &str = "https://www.googleapis.com/";
const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// Issue source backed by a Google Sheets document.
pub struct SheetsSource {
    config: SheetsConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
    #[serde(default)]
    index: i64,
}

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl SheetsSource {
    pub fn new(config: SheetsConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| SourceError::Http {
                endpoint: "client".into(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { config, client })
    }

    async fn spreadsheet_id(&self, token: &SecretString) -> Result<String, SourceError> {
        if let Some(id) = &self.config.spreadsheet_id {
            return Ok(id.clone());
        }

        let name = &self.config.spreadsheet_name;
        let url = api_url(DRIVE_API_BASE, &["drive", "v3", "files"])?;
        let query = drive_name_query(name);
        let list: DriveFileList = self
            .get_json(
                url,
                &[
                    ("q", query.as_str()),
                    ("fields", "files(id,name)"),
                    ("pageSize", "1"),
                    ("supportsAllDrives", "true"),
                    ("includeItemsFromAllDrives", "true"),
                ],
                token,
            )
            .await?;

        list.files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| SourceError::NotFound(name.clone()))
    }

    async fn first_sheet_title(
        &self,
        spreadsheet_id: &str,
        token: &SecretString,
    ) -> Result<String, SourceError> {
        let url = api_url(SHEETS_API_BASE, &["v4", "spreadsheets", spreadsheet_id])?;
        let meta: SpreadsheetMeta = self
            .get_json(url, &[("fields", "sheets.properties(title,index)")], token)
            .await?;
        first_sheet(meta)
    }

    async fn read_values(
        &self,
        spreadsheet_id: &str,
        sheet_title: &str,
        token: &SecretString,
    ) -> Result<ValueRange, SourceError> {
        let range = a1_sheet_range(sheet_title);
        let url = api_url(
            SHEETS_API_BASE,
            &["v4", "spreadsheets", spreadsheet_id, "values", range.as_str()],
        )?;
        self.get_json(
            url,
            &[
                ("majorDimension", "ROWS"),
                ("valueRenderOption", "FORMATTED_VALUE"),
            ],
            token,
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
        token: &SecretString,
    ) -> Result<T, SourceError> {
        let endpoint = url.path().to_string();
        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| SourceError::Http {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Http {
                endpoint,
                reason: format!("{status}: {body}"),
            });
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::Decode(format!("{endpoint}: {e}")))
    }
}

#[async_trait]
impl IssueSource for SheetsSource {
    fn name(&self) -> &str {
        "sheets"
    }

    async fn fetch_rows(&self) -> Result<Vec<IssueRow>, SourceError> {
        let token = self
            .config
            .credentials
            .access_token(&self.client, SHEETS_SCOPES)
            .await?;
        let spreadsheet_id = self.spreadsheet_id(&token).await?;
        let title = self.first_sheet_title(&spreadsheet_id, &token).await?;
        let values = self.read_values(&spreadsheet_id, &title, &token).await?;

        let rows = rows_from_values(values.values)?;
        tracing::debug!(
            spreadsheet = %self.config.spreadsheet_name,
            sheet = %title,
            rows = rows.len(),
            "Read spreadsheet issues"
        );
        Ok(rows)
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Build an API URL from a base and path segments, percent-encoding each segment.
fn api_url(base: &str, segments: &[&str]) -> Result<Url, SourceError> {
    let mut url = Url::parse(base).map_err(|e| SourceError::Decode(format!("bad URL {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| SourceError::Decode(format!("URL {base} cannot have a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Drive search expression matching a live spreadsheet with exactly this name.
pub fn drive_name_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!("name = '{escaped}' and mimeType = '{SPREADSHEET_MIME_TYPE}' and trashed = false")
}

/// A1 range covering a whole worksheet.
pub fn a1_sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn first_sheet(meta: SpreadsheetMeta) -> Result<String, SourceError> {
    meta.sheets
        .into_iter()
        .min_by_key(|s| s.properties.index)
        .map(|s| s.properties.title)
        .ok_or_else(|| SourceError::Decode("spreadsheet has no worksheets".into()))
}

/// Map a worksheet value grid (header row first) into issue rows.
pub fn rows_from_values(values: Vec<Vec<serde_json::Value>>) -> Result<Vec<IssueRow>, SourceError> {
    let mut grid = values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect::<Vec<_>>());
    let Some(headers) = grid.next() else {
        return Ok(Vec::new());
    };
    rows_from_table(&headers, grid)
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn grid(value: serde_json::Value) -> Vec<Vec<serde_json::Value>> {
        serde_json::from_value::<ValueRange>(value).unwrap().values
    }

    #[test]
    fn rows_from_values_maps_header_row() {
        let values = grid(json!({
            "range": "'Sheet1'!A1:G3",
            "majorDimension": "ROWS",
            "values": [
                ["ID Issue", "Application", "Service Owner", "Service Owner Email", "Type", "Issue Description", "Status"],
                ["SEC-1", "Billing", "Alice", "alice@example.com", "Vuln", "Old TLS", "Open"],
                ["SEC-2", "Portal", "Bob"]
            ]
        }));
        let rows = rows_from_values(values).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].service_owner_email, "alice@example.com");
        assert_eq!(rows[0].status, "Open");
        assert_eq!(rows[1].service_owner, "Bob");
        assert_eq!(rows[1].status, "");
    }

    #[test]
    fn rows_from_values_stringifies_non_text_cells() {
        let rows = rows_from_values(vec![
            vec![json!("ID Issue"), json!("Status"), json!("Type")],
            vec![json!(42), json!("Open"), json!(null)],
        ])
        .unwrap();
        assert_eq!(rows[0].id, "42");
        assert_eq!(rows[0].issue_type, "");
    }

    #[test]
    fn empty_sheet_has_no_rows() {
        assert!(rows_from_values(grid(json!({"range": "A1:Z1000"}))).unwrap().is_empty());
        assert!(
            rows_from_values(vec![vec![json!("ID Issue"), json!("Status")]])
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn first_sheet_uses_lowest_index() {
        let meta: SpreadsheetMeta = serde_json::from_value(json!({
            "sheets": [
                {"properties": {"title": "Archive", "index": 1}},
                {"properties": {"title": "Issues", "index": 0}}
            ]
        }))
        .unwrap();
        assert_eq!(first_sheet(meta).unwrap(), "Issues");
    }

    #[test]
    fn first_sheet_missing_is_decode_error() {
        let meta: SpreadsheetMeta = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(first_sheet(meta), Err(SourceError::Decode(_))));
    }

    #[test]
    fn drive_query_escapes_quotes() {
        assert_eq!(
            drive_name_query("Bob's Issues"),
            "name = 'Bob\\'s Issues' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false"
        );
    }

    #[test]
    fn a1_range_quotes_title() {
        assert_eq!(a1_sheet_range("Sheet1"), "'Sheet1'");
        assert_eq!(a1_sheet_range("Q3 'open'"), "'Q3 ''open'''");
    }

    #[test]
    fn api_url_encodes_segments() {
        let url = api_url(
            SHEETS_API_BASE,
            &["v4", "spreadsheets", "abc", "values", "'My Sheet'"],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc/values/'My%20Sheet'"
        );
    }

    #[test]
    fn drive_file_list_tolerates_missing_files() {
        let list: DriveFileList = serde_json::from_value(json!({})).unwrap();
        assert!(list.files.is_empty());
    }
}
