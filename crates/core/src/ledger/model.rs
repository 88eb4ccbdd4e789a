//! Ledger row models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dollar_sheets_market_data::{Instrument, PerInstrument};

use super::numbers::from_ledger_number;
use crate::errors::{Error, Result};

/// Textual date format of the ledger's date column.
pub const LEDGER_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format of the month bucket column (year + month, no separators).
pub const MONTH_BUCKET_FORMAT: &str = "%Y%m";

/// Header of the date column.
pub const DATE_COLUMN: &str = "Fecha";

/// Header of the month bucket column.
pub const MONTH_BUCKET_COLUMN: &str = "Anio/mes";

/// One persisted calendar day of the ledger.
///
/// Instrument values are kept in ledger-native text (comma decimal) so that
/// carried-forward cells are copied verbatim, never reformatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub month_bucket: String,
    pub values: PerInstrument<String>,
}

impl LedgerRow {
    /// Creates a row, deriving the month bucket from `date`.
    pub fn new(date: NaiveDate, values: PerInstrument<String>) -> Self {
        Self {
            date,
            month_bucket: month_bucket(date),
            values,
        }
    }

    pub fn value(&self, instrument: Instrument) -> &str {
        self.values.get(instrument)
    }

    /// Date as written in the ledger's date column.
    pub fn formatted_date(&self) -> String {
        format_ledger_date(self.date)
    }

    /// Native-number view of this row.
    pub fn to_snapshot(&self) -> Result<DailySnapshot> {
        let values = PerInstrument::try_from_fn(|i| from_ledger_number(self.value(i)))?;
        Ok(DailySnapshot {
            date: self.date,
            values,
        })
    }
}

/// Native decimal values of one ledger day, used for day-over-day reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub date: NaiveDate,
    pub values: PerInstrument<Decimal>,
}

/// `YYYYMM` bucket of a date.
pub fn month_bucket(date: NaiveDate) -> String {
    date.format(MONTH_BUCKET_FORMAT).to_string()
}

pub fn format_ledger_date(date: NaiveDate) -> String {
    date.format(LEDGER_DATE_FORMAT).to_string()
}

/// Parses a `DD/MM/YYYY` ledger date.
pub fn parse_ledger_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), LEDGER_DATE_FORMAT).map_err(|e| {
        Error::invalid_ledger_state(format!("invalid ledger date '{}': {}", text, e))
    })
}
