//! Mapping between sheet rows and [`LedgerRow`]s.
//!
//! Columns are located by header name, so the worksheet may order them
//! freely or carry extra columns.

use dollar_sheets_core::errors::{Error, Result};
use dollar_sheets_core::ledger::{parse_ledger_date, LedgerRow, DATE_COLUMN, MONTH_BUCKET_COLUMN};
use dollar_sheets_market_data::{Instrument, PerInstrument};

/// Column positions resolved from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    width: usize,
    date: usize,
    month_bucket: usize,
    instruments: PerInstrument<usize>,
}

impl SheetLayout {
    pub fn from_header(header: &[String]) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| {
                    Error::invalid_ledger_state(format!("ledger header has no '{}' column", name))
                })
        };

        Ok(Self {
            width: header.len(),
            date: find(DATE_COLUMN)?,
            month_bucket: find(MONTH_BUCKET_COLUMN)?,
            instruments: PerInstrument::try_from_fn(|i| find(i.column()))?,
        })
    }

    /// Parses one data row. Missing trailing cells read as empty.
    pub fn parse_row(&self, cells: &[String]) -> Result<LedgerRow> {
        let cell = |index: usize| cells.get(index).map(|c| c.trim()).unwrap_or("");

        let date = parse_ledger_date(cell(self.date))?;
        let values = PerInstrument::from_fn(|i| cell(*self.instruments.get(i)).to_string());

        let mut row = LedgerRow::new(date, values);
        let stored_bucket = cell(self.month_bucket);
        if !stored_bucket.is_empty() {
            row.month_bucket = stored_bucket.to_string();
        }
        Ok(row)
    }

    /// Cells of `row` in header order; unknown columns are left blank.
    pub fn to_cells(&self, row: &LedgerRow) -> Vec<String> {
        let mut cells = vec![String::new(); self.width];
        cells[self.date] = row.formatted_date();
        cells[self.month_bucket] = row.month_bucket.clone();
        for instrument in Instrument::ALL {
            cells[*self.instruments.get(instrument)] = row.value(instrument).to_string();
        }
        cells
    }
}

/// Data rows below the header, without trailing blank rows.
pub fn data_rows(values: &[Vec<String>]) -> &[Vec<String>] {
    let body = values.get(1..).unwrap_or(&[]);
    let end = body
        .iter()
        .rposition(|row| row.iter().any(|c| !c.trim().is_empty()))
        .map_or(0, |i| i + 1);
    &body[..end]
}
