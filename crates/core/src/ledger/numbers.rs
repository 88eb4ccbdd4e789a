//! Conversion between native decimals and the ledger's numeric text.
//!
//! The ledger is a spreadsheet with an es-AR locale: `,` is the decimal
//! separator and `.` groups thousands.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::{Error, Result};

/// Formats a price the way the ledger expects it: `920.5` becomes `"920,5"`.
///
/// Trailing zeros are dropped and no thousands separator is emitted, so the
/// spreadsheet parses the cell as a number when entered as user input.
pub fn to_ledger_number(value: Decimal) -> String {
    value.normalize().to_string().replace('.', ",")
}

/// Parses a ledger cell such as `"1.234,56"`, `"920,5"` or `"$ 950"`.
pub fn from_ledger_number(text: &str) -> Result<Decimal> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return Err(Error::invalid_ledger_state(format!(
            "empty numeric cell '{}'",
            text
        )));
    }

    Decimal::from_str(&cleaned).map_err(|e| {
        Error::invalid_ledger_state(format!("invalid numeric cell '{}': {}", text, e))
    })
}
