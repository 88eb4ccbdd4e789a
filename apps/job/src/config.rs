use std::time::Duration;

use anyhow::Context;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono_tz::Tz;

use dollar_sheets_core::constants::{DEFAULT_JOB_NAME, DEFAULT_MAX_ALLOWED_TIME_MS};
use dollar_sheets_core::utils::time_utils::{parse_timezone, DEFAULT_LEDGER_TZ};
use dollar_sheets_core::Error;
use dollar_sheets_market_data::{AmbitoConfig, Instrument};
use dollar_sheets_storage_sheets::SheetsConfig;

/// Where run notifications are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    pub service_url: String,
    pub channel_id: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub sheets: SheetsConfig,
    pub quote_source: AmbitoConfig,
    /// `None` when either the service URL or the channel id is unset.
    pub notifications: Option<NotificationConfig>,
    pub pushgateway_url: Option<String>,
    pub max_allowed_time: Duration,
    pub timezone: Tz,
    pub job_name: String,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &str| get(key).ok_or_else(|| Error::MissingConfigKey(key.to_string()));

        let raw_key = require("SERVICE_ACCOUNT_KEY")?;
        let service_account_key = if get("KEY_BASE64").is_some_and(|v| is_truthy(&v)) {
            decode_base64_key(&raw_key)?
        } else {
            raw_key
        };

        let mut sheets = SheetsConfig::new(
            require("SERVICE_ACCOUNT_EMAIL")?,
            service_account_key,
            require("SHEET_ID")?,
        );
        if let Some(title) = get("SHEET_TITLE") {
            sheets.sheet_title = title;
        }
        if let Some(base_url) = get("SHEETS_API_BASE_URL") {
            sheets.api_base_url = base_url;
        }

        let mut quote_source = AmbitoConfig::default();
        if let Some(base_url) = get("QUOTE_SOURCE_BASE_URL") {
            quote_source.base_url = base_url;
        }
        for instrument in Instrument::ALL {
            if let Some(endpoint) = get(&format!("QUOTE_ENDPOINT_{}", instrument.env_key())) {
                *quote_source.endpoints.get_mut(instrument) = endpoint;
            }
        }

        let notifications = match (
            get("NOTIFICATION_SERVICE_URL"),
            get("DISCORD_NOTIFICATION_CHANNEL_ID"),
        ) {
            (Some(service_url), Some(channel_id)) => Some(NotificationConfig {
                service_url,
                channel_id,
            }),
            _ => None,
        };

        let timezone = match get("LEDGER_TIMEZONE") {
            Some(name) => parse_timezone(&name)?,
            None => DEFAULT_LEDGER_TZ,
        };

        Ok(Self {
            sheets,
            quote_source,
            notifications,
            pushgateway_url: get("PROMETHEUS_PUSHGATEWAY_URL"),
            max_allowed_time: parse_budget(get("MAX_ALLOWED_TIME_MS").as_deref()),
            timezone,
            job_name: get("JOB_NAME").unwrap_or_else(|| DEFAULT_JOB_NAME.to_string()),
        })
    }
}

/// Run budget in milliseconds; missing, unparsable or zero values use the default.
fn parse_budget(value: Option<&str>) -> Duration {
    let millis = value
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_MAX_ALLOWED_TIME_MS);
    Duration::from_millis(millis)
}

fn is_truthy(value: &str) -> bool {
    !matches!(
        value.to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

fn decode_base64_key(encoded: &str) -> anyhow::Result<String> {
    let bytes = BASE64
        .decode(encoded)
        .context("SERVICE_ACCOUNT_KEY is not valid base64")?;
    String::from_utf8(bytes).context("SERVICE_ACCOUNT_KEY does not decode to UTF-8 text")
}
