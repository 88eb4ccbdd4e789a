//! Gap detection and carry-forward row synthesis.
//!
//! Given the last persisted row and a fresh quote series, these functions
//! produce one row per missing calendar day. A day with a published price uses
//! it; a day without one repeats the previous row's cell for that instrument.
//! The decision is made per instrument, so an outage on one chart does not
//! hold back the others.

use chrono::NaiveDate;
use log::debug;

use dollar_sheets_market_data::{PerInstrument, QuoteSeries};

use super::model::LedgerRow;
use super::numbers::to_ledger_number;
use crate::errors::{Error, Result};

/// Every calendar day after `last_loaded` up to and including `today`, ascending.
///
/// Returns an empty vector when the ledger is already up to date. A ledger
/// dated after `today` is corrupt (or the clock is skewed) and is rejected.
pub fn compute_missing_dates(last_loaded: NaiveDate, today: NaiveDate) -> Result<Vec<NaiveDate>> {
    if last_loaded > today {
        return Err(Error::invalid_ledger_state(format!(
            "Can't append data of days that are after today: last loaded day is {} but today is {}",
            last_loaded, today
        )));
    }

    let mut dates = Vec::new();
    let mut current = last_loaded;
    while current < today {
        let next = current.succ_opt().ok_or_else(|| {
            Error::invalid_ledger_state(format!("no calendar day after {}", current))
        })?;
        if next > today {
            return Err(Error::invalid_ledger_state(format!(
                "Trying to append data of a day that is after today. Tried to append data of {} but today is {}",
                next, today
            )));
        }
        dates.push(next);
        current = next;
    }

    Ok(dates)
}

/// Builds the row for `date`, falling back to `previous` per instrument.
pub fn synthesize_row(quotes: &QuoteSeries, date: NaiveDate, previous: &LedgerRow) -> LedgerRow {
    let values = PerInstrument::from_fn(|instrument| match quotes.price_on(instrument, date) {
        Some(price) => to_ledger_number(price),
        None => {
            debug!("No {} quote for {}, carrying forward", instrument, date);
            previous.value(instrument).to_string()
        }
    });

    LedgerRow::new(date, values)
}

/// Synthesizes one row per missing date, chaining each row off the one before.
///
/// The output keeps the order of `missing_dates`; the store appends in that
/// order, which is what keeps the ledger sorted.
pub fn generate_rows(
    quotes: &QuoteSeries,
    missing_dates: &[NaiveDate],
    last_loaded: &LedgerRow,
) -> Vec<LedgerRow> {
    let mut rows: Vec<LedgerRow> = Vec::with_capacity(missing_dates.len());

    for date in missing_dates {
        let previous = rows.last().unwrap_or(last_loaded);
        let row = synthesize_row(quotes, *date, previous);
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use dollar_sheets_market_data::Instrument;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base_row(date: NaiveDate) -> LedgerRow {
        LedgerRow::new(
            date,
            PerInstrument {
                oficial: "900".to_string(),
                blue: "1200".to_string(),
                mep: "1100,5".to_string(),
                ccl: "1150".to_string(),
                cripto: "1180".to_string(),
            },
        )
    }

    #[test]
    fn test_same_day_is_empty() {
        let d = day(2024, 5, 10);
        assert!(compute_missing_dates(d, d).unwrap().is_empty());
    }

    #[test]
    fn test_next_day_is_single_element() {
        let d = day(2024, 5, 10);
        assert_eq!(
            compute_missing_dates(d, day(2024, 5, 11)).unwrap(),
            vec![day(2024, 5, 11)]
        );
    }

    #[test]
    fn test_future_ledger_is_invalid() {
        let err = compute_missing_dates(day(2024, 5, 12), day(2024, 5, 10)).unwrap_err();
        assert!(matches!(err, Error::InvalidLedgerState(_)));
    }

    #[test]
    fn test_missing_dates_are_contiguous_and_end_today() {
        let cases = [
            (day(2024, 5, 10), day(2024, 5, 13)),
            (day(2023, 12, 25), day(2024, 1, 3)),
            (day(2024, 2, 27), day(2024, 3, 2)),
            (day(2023, 1, 1), day(2024, 1, 1)),
        ];

        for (last, today) in cases {
            let dates = compute_missing_dates(last, today).unwrap();
            let expected_len = (today - last).num_days() as usize;

            assert_eq!(dates.len(), expected_len, "{} -> {}", last, today);
            assert_eq!(dates.first().copied(), last.succ_opt());
            assert_eq!(dates.last().copied(), Some(today));
            for pair in dates.windows(2) {
                assert_eq!(pair[0].succ_opt(), Some(pair[1]));
            }
        }
    }

    #[test]
    fn test_leap_day_is_included() {
        let dates = compute_missing_dates(day(2024, 2, 28), day(2024, 3, 1)).unwrap();
        assert_eq!(dates, vec![day(2024, 2, 29), day(2024, 3, 1)]);
    }

    #[test]
    fn test_synthesize_uses_fresh_price_and_converts_it() {
        let mut quotes = QuoteSeries::default();
        quotes.insert(Instrument::Blue, day(2024, 5, 11), dec!(1215.5));

        let row = synthesize_row(&quotes, day(2024, 5, 11), &base_row(day(2024, 5, 10)));

        assert_eq!(row.value(Instrument::Blue), "1215,5");
        assert_eq!(row.value(Instrument::Oficial), "900");
        assert_eq!(row.value(Instrument::Mep), "1100,5");
        assert_eq!(row.date, day(2024, 5, 11));
    }

    #[test]
    fn test_synthesize_derives_month_bucket_from_date() {
        let previous = base_row(day(2024, 4, 30));
        let row = synthesize_row(&QuoteSeries::default(), day(2024, 5, 1), &previous);

        assert_eq!(previous.month_bucket, "202404");
        assert_eq!(row.month_bucket, "202405");
    }

    #[test]
    fn test_synthesize_is_deterministic() {
        let mut quotes = QuoteSeries::default();
        quotes.insert(Instrument::Ccl, day(2024, 5, 11), dec!(1160.25));
        let previous = base_row(day(2024, 5, 10));

        let first = synthesize_row(&quotes, day(2024, 5, 11), &previous);
        let second = synthesize_row(&quotes, day(2024, 5, 11), &previous);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn test_carry_forward_chains_across_gap() {
        let last = base_row(day(2024, 5, 10));
        let mut quotes = QuoteSeries::default();
        quotes.insert(Instrument::Mep, day(2024, 5, 12), dec!(1120));

        let missing = compute_missing_dates(last.date, day(2024, 5, 13)).unwrap();
        let rows = generate_rows(&quotes, &missing, &last);

        assert_eq!(rows.len(), 3);
        let meps: Vec<&str> = rows.iter().map(|r| r.value(Instrument::Mep)).collect();
        assert_eq!(meps, vec!["1100,5", "1120", "1120"]);

        for row in &rows {
            for instrument in [
                Instrument::Oficial,
                Instrument::Blue,
                Instrument::Ccl,
                Instrument::Cripto,
            ] {
                assert_eq!(row.value(instrument), last.value(instrument));
            }
        }
    }

    #[test]
    fn test_fresh_value_only_in_middle_row() {
        let last = base_row(day(2024, 5, 10));
        let mut quotes = QuoteSeries::default();
        // Stale entries outside the gap must not leak in
        quotes.insert(Instrument::Oficial, day(2024, 5, 9), dec!(1));
        quotes.insert(Instrument::Oficial, day(2024, 5, 12), dec!(930));

        let missing = compute_missing_dates(last.date, day(2024, 5, 13)).unwrap();
        let rows = generate_rows(&quotes, &missing, &last);
        let oficial: Vec<&str> = rows.iter().map(|r| r.value(Instrument::Oficial)).collect();

        assert_eq!(oficial, vec!["900", "930", "930"]);
    }

    #[test]
    fn test_end_to_end_may_2024_scenario() {
        let last = base_row(day(2024, 5, 10));
        let mut quotes = QuoteSeries::default();
        quotes.insert(Instrument::Oficial, day(2024, 5, 11), dec!(920));
        quotes.insert(Instrument::Oficial, day(2024, 5, 13), dec!(950));

        let missing = compute_missing_dates(last.date, day(2024, 5, 13)).unwrap();
        let rows = generate_rows(&quotes, &missing, &last);

        let dates: Vec<String> = rows.iter().map(|r| r.formatted_date()).collect();
        assert_eq!(dates, vec!["11/05/2024", "12/05/2024", "13/05/2024"]);
        let oficial: Vec<&str> = rows.iter().map(|r| r.value(Instrument::Oficial)).collect();
        assert_eq!(oficial, vec!["920", "920", "950"]);
    }

    #[test]
    fn test_generate_rows_empty_input() {
        let rows = generate_rows(&QuoteSeries::default(), &[], &base_row(day(2024, 5, 10)));
        assert!(rows.is_empty());
    }
}
