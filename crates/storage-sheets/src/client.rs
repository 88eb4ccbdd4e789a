//! Minimal Google Sheets v4 values API client.
//!
//! Only the two calls the ledger needs: read a range, append rows.

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::auth::{ServiceAccountAuth, ServiceAccountKey};
use crate::errors::StorageError;

/// Default Sheets API host.
pub const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `values` payload shared by reads and appends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

impl ValueRange {
    /// Cells rendered as text; non-string values use their JSON rendering.
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.values
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        serde_json::Value::String(s) => s.clone(),
                        serde_json::Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    #[serde(default)]
    updates: Option<UpdateSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateSummary {
    #[serde(default)]
    updated_rows: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client bound to one spreadsheet.
pub struct SheetsClient {
    client: reqwest::Client,
    auth: ServiceAccountAuth,
    base_url: String,
    spreadsheet_id: String,
}

impl SheetsClient {
    pub fn new(
        key: ServiceAccountKey,
        spreadsheet_id: &str,
        base_url: &str,
    ) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            auth: ServiceAccountAuth::new(key)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
        })
    }

    async fn headers(&self) -> Result<HeaderMap, StorageError> {
        let token = self.auth.access_token(&self.client).await?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| StorageError::Auth("Invalid access token format".into()))?;
        headers.insert(AUTHORIZATION, auth_value);
        Ok(headers)
    }

    fn values_url(&self, range: &str) -> String {
        values_url(&self.base_url, &self.spreadsheet_id, range)
    }

    /// Reads `range` with formatted cell values, rows major.
    ///
    /// GET /v4/spreadsheets/{id}/values/{range}
    pub async fn get_values(&self, range: &str) -> Result<ValueRange, StorageError> {
        let url = self.values_url(range);
        debug!("Reading sheet range {}", range);

        let response = self
            .client
            .get(&url)
            .headers(self.headers().await?)
            .query(&[
                ("valueRenderOption", "FORMATTED_VALUE"),
                ("majorDimension", "ROWS"),
            ])
            .send()
            .await?;

        parse_response(response).await
    }

    /// Appends rows after the last non-empty row of `range`.
    ///
    /// Returns the number of rows the API reports as written.
    ///
    /// POST /v4/spreadsheets/{id}/values/{range}:append
    pub async fn append_values(
        &self,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<usize, StorageError> {
        let url = format!("{}:append", self.values_url(range));
        let requested = rows.len();
        let body = ValueRange {
            range: None,
            major_dimension: Some("ROWS".to_string()),
            values: rows
                .into_iter()
                .map(|row| row.into_iter().map(serde_json::Value::String).collect())
                .collect(),
        };

        let response = self
            .client
            .post(&url)
            .headers(self.headers().await?)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&body)
            .send()
            .await?;

        let appended: AppendResponse = parse_response(response).await?;
        Ok(appended
            .updates
            .and_then(|u| u.updated_rows)
            .unwrap_or(requested))
    }
}

fn values_url(base_url: &str, spreadsheet_id: &str, range: &str) -> String {
    format!(
        "{}/v4/spreadsheets/{}/values/{}",
        base_url,
        spreadsheet_id,
        urlencoding::encode(range)
    )
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, StorageError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        return Err(StorageError::api(status.as_u16(), message));
    }

    Ok(serde_json::from_str(&body)?)
}
