//! Ámbito Financiero quote provider.
//!
//! Ámbito publishes a trailing-year chart per dollar quote type. Each chart is
//! a JSON array whose first element is a header (`["fecha", "Dólar Oficial"]`)
//! followed by `["DD/MM/YYYY", price]` pairs. Prices are usually JSON numbers,
//! but some charts serve them as comma-decimal strings.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{DailySeries, Instrument, PerInstrument};
use crate::provider::QuoteProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "AMBITO";

/// Public base URL of the charts API.
pub const DEFAULT_BASE_URL: &str = "https://mercados.ambito.com";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Date format used by the charts.
const CHART_DATE_FORMAT: &str = "%d/%m/%Y";

/// Endpoint selection for the Ámbito provider.
///
/// Paths are relative to `base_url` unless they are absolute URLs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmbitoConfig {
    pub base_url: String,
    pub endpoints: PerInstrument<String>,
}

impl AmbitoConfig {
    /// Default chart path for an instrument.
    pub fn default_endpoint(instrument: Instrument) -> &'static str {
        match instrument {
            Instrument::Oficial => "/dolar/oficial/grafico/anual",
            Instrument::Blue => "/dolar/informal/grafico/anual",
            Instrument::Mep => "/dolarrava/mep/grafico/anual",
            Instrument::Ccl => "/dolarrava/cl/grafico/anual",
            Instrument::Cripto => "/dolarcripto/grafico/anual",
        }
    }

    /// Full URL for an instrument's chart.
    pub fn url_for(&self, instrument: Instrument) -> String {
        let endpoint = self.endpoints.get(instrument);
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.clone();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

impl Default for AmbitoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoints: PerInstrument::from_fn(|i| Self::default_endpoint(i).to_string()),
        }
    }
}

/// Ámbito Financiero daily quote provider.
///
/// # Example
///
/// ```ignore
/// use dollar_sheets_market_data::{AmbitoConfig, AmbitoProvider};
///
/// let provider = AmbitoProvider::new(&AmbitoConfig::default());
/// ```
pub struct AmbitoProvider {
    client: Client,
    config: AmbitoConfig,
}

impl AmbitoProvider {
    pub fn new(config: &AmbitoConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl QuoteProvider for AmbitoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_daily_series(
        &self,
        instrument: Instrument,
    ) -> Result<DailySeries, MarketDataError> {
        let url = self.config.url_for(instrument);
        debug!("Fetching {} chart from {}", instrument, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MarketDataError::from_transport(PROVIDER_ID, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::HttpStatus {
                provider: PROVIDER_ID.to_string(),
                instrument,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::from_transport(PROVIDER_ID, e))?;

        parse_chart(instrument, &body)
    }
}

/// Parses a chart body into a daily series, discarding the header entry.
///
/// Entries without a usable date or a positive price are skipped with a
/// warning, so those days fall back to carry-forward. Only a body that is not
/// a JSON array fails the whole chart.
pub fn parse_chart(instrument: Instrument, body: &str) -> Result<DailySeries, MarketDataError> {
    let entries: Vec<Value> = serde_json::from_str(body)
        .map_err(|e| MarketDataError::malformed(PROVIDER_ID, instrument, e.to_string()))?;

    let mut series = DailySeries::new();
    for entry in entries.iter().skip(1) {
        let (date, price) = match parse_entry(entry) {
            Ok(parsed) => parsed,
            Err(reason) => {
                warn!("Skipping {} chart entry {}: {}", instrument, entry, reason);
                continue;
            }
        };
        if series.insert(date, price).is_some() {
            warn!("{} chart lists {} more than once; keeping the last", instrument, date);
        }
    }

    Ok(series)
}

fn parse_entry(entry: &Value) -> Result<(NaiveDate, Decimal), String> {
    let pair = entry
        .as_array()
        .filter(|pair| pair.len() >= 2)
        .ok_or_else(|| "expected [date, price]".to_string())?;

    let raw_date = pair[0]
        .as_str()
        .ok_or_else(|| "date is not a string".to_string())?;
    let date = NaiveDate::parse_from_str(raw_date.trim(), CHART_DATE_FORMAT)
        .map_err(|e| format!("invalid date '{}': {}", raw_date, e))?;

    let price = match &pair[1] {
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text))
        }
        Value::String(s) => parse_price_text(s),
        other => return Err(format!("price is not numeric: {}", other)),
    }
    .map_err(|e| format!("invalid price: {}", e))?;

    if price <= Decimal::ZERO {
        return Err(format!("non-positive price {}", price));
    }

    Ok((date, price))
}

/// Textual price. `.` groups thousands only when a `,` decimal is present.
fn parse_price_text(text: &str) -> Result<Decimal, rust_decimal::Error> {
    let text = text.trim();
    if text.contains(',') {
        Decimal::from_str(&text.replace('.', "").replace(',', "."))
    } else {
        Decimal::from_str(text)
    }
}
