//! Thin client for the Google Sheets API v4 values endpoints.
//!
//! The backing spreadsheet is a makeshift database: every operation is a
//! column-indexed read or write of a cell range. No retries, no conflict
//! detection between concurrent editors.

mod auth;

pub use auth::{Credentials, ServiceAccountKey, TokenProvider};

use crate::constants::{HTTP_TIMEOUT_SECS, SHEETS_BASE_URL};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// A block of cell values, row-major. Request body for writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub range: String,
    pub major_dimension: String,
    pub values: Vec<Vec<String>>,
}

impl ValueRange {
    pub fn rows(range: impl Into<String>, values: Vec<Vec<String>>) -> Self {
        Self {
            range: range.into(),
            major_dimension: "ROWS".to_string(),
            values,
        }
    }
}

/// Response of a values read. `values` is absent when the range is empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSet {
    pub range: String,
    #[serde(default)]
    pub major_dimension: String,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

/// Counts reported back for a write.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub updated_range: String,
    #[serde(default)]
    pub updated_rows: u32,
    #[serde(default)]
    pub updated_columns: u32,
    #[serde(default)]
    pub updated_cells: u32,
}

/// Response of a values update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub spreadsheet_id: String,
    pub updated_range: String,
    #[serde(default)]
    pub updated_rows: u32,
    #[serde(default)]
    pub updated_columns: u32,
    #[serde(default)]
    pub updated_cells: u32,
}

/// Response of a values append.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendResponse {
    pub spreadsheet_id: String,
    pub updates: UpdateResult,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Full data range of a sheet including the header row, e.g. `Players!A1:H`.
pub fn data_range(sheet: &str, last_column: char) -> String {
    format!("{}!A1:{}", sheet, last_column)
}

/// Range of a single row. `row` is the 1-based sheet row number; the data row
/// at index `i` of a read (headers at index 0) sits at sheet row `i + 1`.
pub fn row_range(sheet: &str, last_column: char, row: u32) -> String {
    format!("{}!A{}:{}{}", sheet, row, last_column, row)
}

/// HTTP client bound to one spreadsheet.
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    credentials: Credentials,
}

impl SheetsClient {
    pub fn new(spreadsheet_id: impl Into<String>, credentials: Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: SHEETS_BASE_URL.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            credentials,
        })
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Read a cell range. Trailing empty cells of a row may be omitted by the
    /// API, so row widths vary.
    pub async fn get_values(&self, range: &str) -> Result<ValueSet> {
        let url = format!("{}/{}/values/{}", self.base_url, self.spreadsheet_id, range);
        debug!(range = range, "GET values");
        let req = self.http.get(&url);
        let resp = self.with_auth(req).await?.send().await?;
        Self::read_json(resp).await
    }

    /// Append one row after the last non-empty row of the range.
    pub async fn append_row(&self, range: &str, row: Vec<String>) -> Result<AppendResponse> {
        let url = format!(
            "{}/{}/values/{}:append",
            self.base_url, self.spreadsheet_id, range
        );
        debug!(range = range, "POST values append");
        let body = ValueRange::rows(range, vec![row]);
        let req = self
            .http
            .post(&url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&body);
        let resp = self.with_auth(req).await?.send().await?;
        Self::read_json(resp).await
    }

    /// Overwrite exactly the cells of `range` with one row.
    pub async fn update_row(&self, range: &str, row: Vec<String>) -> Result<UpdateResponse> {
        let url = format!("{}/{}/values/{}", self.base_url, self.spreadsheet_id, range);
        debug!(range = range, "PUT values");
        let body = ValueRange::rows(range, vec![row]);
        let req = self
            .http
            .put(&url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&body);
        let resp = self.with_auth(req).await?.send().await?;
        Self::read_json(resp).await
    }

    async fn with_auth(&self, req: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        match &self.credentials {
            Credentials::ApiKey(key) => Ok(req.query(&[("key", key.as_str())])),
            Credentials::ServiceAccount(provider) => {
                let token = provider.access_token(&self.http).await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp.json().await?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(Error::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            })
        }
    }
}

/// Human-readable message from an API error body, falling back to raw text.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => {
            let text = body.trim();
            if text.is_empty() {
                "no response body".to_string()
            } else {
                text.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_range_spans_from_header_row() {
        assert_eq!(data_range("Players", 'H'), "Players!A1:H");
        assert_eq!(data_range("Groups", 'G'), "Groups!A1:G");
    }

    #[test]
    fn row_range_addresses_a_single_row() {
        // First data row sits under the header row.
        assert_eq!(row_range("Players", 'H', 2), "Players!A2:H2");
        assert_eq!(row_range("Groups", 'G', 14), "Groups!A14:G14");
    }

    #[test]
    fn value_range_serializes_camel_case() {
        let body = ValueRange::rows("Players!A1:H", vec![vec!["1".to_string()]]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["range"], "Players!A1:H");
        assert_eq!(json["majorDimension"], "ROWS");
        assert_eq!(json["values"][0][0], "1");
    }

    #[test]
    fn value_set_without_values_field_reads_as_empty() {
        // An empty sheet response carries no `values` key at all.
        let set: ValueSet =
            serde_json::from_str(r#"{"range":"Players!A1:H","majorDimension":"ROWS"}"#).unwrap();
        assert!(set.values.is_empty());
    }

    #[test]
    fn update_response_tolerates_missing_counts() {
        let resp: UpdateResponse = serde_json::from_str(
            r#"{"spreadsheetId":"abc","updatedRange":"Players!A2:H2","updatedCells":8}"#,
        )
        .unwrap();
        assert_eq!(resp.updated_cells, 8);
        assert_eq!(resp.updated_rows, 0);
    }

    #[test]
    fn append_response_parses_nested_updates() {
        let resp: AppendResponse = serde_json::from_str(
            r#"{"spreadsheetId":"abc","updates":{"updatedRange":"Players!A7:H7","updatedRows":1,"updatedColumns":8,"updatedCells":8}}"#,
        )
        .unwrap();
        assert_eq!(resp.updates.updated_range, "Players!A7:H7");
        assert_eq!(resp.updates.updated_rows, 1);
    }

    #[test]
    fn api_error_message_prefers_the_json_message() {
        let body = r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(api_error_message(body), "The caller does not have permission");
    }

    #[test]
    fn api_error_message_falls_back_to_raw_text() {
        assert_eq!(api_error_message("  gateway timeout  "), "gateway timeout");
        assert_eq!(api_error_message(""), "no response body");
    }
}
