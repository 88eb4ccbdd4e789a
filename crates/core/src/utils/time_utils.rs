use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::errors::{Error, Result};

/// Default reference timezone for ledger dates.
/// The ledger tracks Argentine market days, so "today" is evaluated in Buenos Aires.
pub const DEFAULT_LEDGER_TZ: Tz = chrono_tz::America::Buenos_Aires;

/// Converts a UTC instant to a ledger date in the given timezone.
///
/// This is the single source of truth for converting instants to ledger days.
/// All date comparisons in a run must go through the same zone to avoid
/// off-by-one errors around midnight.
pub fn ledger_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Current ledger day in `tz`.
pub fn ledger_today(tz: Tz) -> NaiveDate {
    ledger_date_from_utc(Utc::now(), tz)
}

/// Parses an IANA timezone name such as `America/Buenos_Aires`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| Error::InvalidConfigValue(format!("unknown timezone '{}'", name)))
}
