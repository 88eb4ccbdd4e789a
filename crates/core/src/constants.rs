use dollar_sheets_market_data::Instrument;

/// Default wall-clock budget for a whole run (fetch + fill + append), in ms
pub const DEFAULT_MAX_ALLOWED_TIME_MS: u64 = 300_000;

/// Job name used in notifications
pub const DEFAULT_JOB_NAME: &str = "dollar-price-to-google-sheets";

/// Decimal precision for day-over-day deltas in notifications
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Instruments listed in the success notification
pub const NOTIFIED_INSTRUMENTS: [Instrument; 4] = [
    Instrument::Oficial,
    Instrument::Blue,
    Instrument::Mep,
    Instrument::Ccl,
];
