use async_trait::async_trait;
use log::{debug, info};

use dollar_sheets_core::errors::{Error, Result};
use dollar_sheets_core::ledger::{LedgerRow, LedgerStore};

use super::model::{data_rows, SheetLayout};
use crate::auth::{ServiceAccountKey, DEFAULT_TOKEN_URI};
use crate::client::{SheetsClient, DEFAULT_API_BASE_URL};

/// Worksheet title used when none is configured.
pub const DEFAULT_SHEET_TITLE: &str = "Dolar";

/// Connection settings for the ledger spreadsheet.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub service_account_email: String,
    pub service_account_key: String,
    pub spreadsheet_id: String,
    pub sheet_title: String,
    pub api_base_url: String,
    pub token_url: String,
}

impl SheetsConfig {
    pub fn new(
        service_account_email: impl Into<String>,
        service_account_key: impl Into<String>,
        spreadsheet_id: impl Into<String>,
    ) -> Self {
        Self {
            service_account_email: service_account_email.into(),
            service_account_key: service_account_key.into(),
            spreadsheet_id: spreadsheet_id.into(),
            sheet_title: DEFAULT_SHEET_TITLE.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URI.to_string(),
        }
    }
}

/// Ledger backed by one worksheet of a Google spreadsheet.
///
/// Every call reads the sheet afresh; nothing about the tail is cached
/// between calls.
pub struct SheetsLedgerStore {
    client: SheetsClient,
    sheet_title: String,
}

impl SheetsLedgerStore {
    pub fn new(config: &SheetsConfig) -> Result<Self> {
        let key = ServiceAccountKey {
            client_email: config.service_account_email.clone(),
            private_key: config.service_account_key.clone(),
            token_uri: config.token_url.clone(),
        };
        let client = SheetsClient::new(key, &config.spreadsheet_id, &config.api_base_url)?;
        Ok(Self {
            client,
            sheet_title: config.sheet_title.clone(),
        })
    }

    /// Header layout plus every non-blank data row, in sheet order.
    async fn load(&self) -> Result<(SheetLayout, Vec<Vec<String>>)> {
        let values = self
            .client
            .get_values(&a1_range(&self.sheet_title, "A:Z"))
            .await?
            .text_rows();
        let header = values.first().ok_or_else(|| {
            Error::invalid_ledger_state(format!("worksheet '{}' is empty", self.sheet_title))
        })?;
        let layout = SheetLayout::from_header(header)?;
        let rows = data_rows(&values).to_vec();
        debug!(
            "Worksheet '{}' holds {} data row(s)",
            self.sheet_title,
            rows.len()
        );
        Ok((layout, rows))
    }
}

#[async_trait]
impl LedgerStore for SheetsLedgerStore {
    async fn last_row(&self) -> Result<LedgerRow> {
        let (layout, rows) = self.load().await?;
        let last = rows
            .last()
            .ok_or_else(|| Error::invalid_ledger_state("ledger has no data rows"))?;
        layout.parse_row(last)
    }

    async fn last_two_rows(&self) -> Result<(LedgerRow, LedgerRow)> {
        let (layout, rows) = self.load().await?;
        match rows.as_slice() {
            [.., previous, latest] => Ok((layout.parse_row(previous)?, layout.parse_row(latest)?)),
            _ => Err(Error::invalid_ledger_state(
                "ledger has fewer than two data rows",
            )),
        }
    }

    async fn append_rows(&self, rows: &[LedgerRow]) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let header = self
            .client
            .get_values(&a1_range(&self.sheet_title, "1:1"))
            .await?
            .text_rows();
        let layout = SheetLayout::from_header(header.first().map_or(&[][..], |h| h.as_slice()))?;
        let cells = rows.iter().map(|row| layout.to_cells(row)).collect();

        let appended = self
            .client
            .append_values(&a1_range(&self.sheet_title, "A:Z"), cells)
            .await?;
        info!(
            "Appended {} row(s) to worksheet '{}'",
            appended, self.sheet_title
        );
        Ok(appended)
    }
}

/// A1 range on `sheet_title`, quoting titles that are not plain words.
fn a1_range(sheet_title: &str, cells: &str) -> String {
    if sheet_title.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        format!("{}!{}", sheet_title, cells)
    } else {
        format!("'{}'!{}", sheet_title.replace('\'', "''"), cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a1_range_quotes_titles() {
        assert_eq!(a1_range("Dolar", "A:Z"), "Dolar!A:Z");
        assert_eq!(a1_range("Dolar 2024", "1:1"), "'Dolar 2024'!1:1");
        assert_eq!(a1_range("Tom's", "A:Z"), "'Tom''s'!A:Z");
    }

    #[test]
    fn test_config_defaults() {
        let config = SheetsConfig::new("svc@example.iam.gserviceaccount.com", "key", "sheet-id");

        assert_eq!(config.sheet_title, "Dolar");
        assert_eq!(config.api_base_url, "https://sheets.googleapis.com");
        assert_eq!(config.token_url, "https://oauth2.googleapis.com/token");
    }

    #[test]
    fn test_store_rejects_invalid_key() {
        let config = SheetsConfig::new("svc@example.iam.gserviceaccount.com", "not a pem", "id");
        assert!(matches!(
            SheetsLedgerStore::new(&config),
            Err(Error::Ledger(_))
        ));
    }
}
