use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use dollar_sheets_core::jobs::{JobRunner, LedgerSyncService};
use dollar_sheets_core::notifications::{NotificationSink, RunOutcome};
use dollar_sheets_market_data::AmbitoProvider;
use dollar_sheets_notifier::{DiscordNotifier, LogNotifier};
use dollar_sheets_storage_sheets::SheetsLedgerStore;

use crate::config::Config;
use crate::metrics::RunMetrics;

pub fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_sink(config: &Config) -> anyhow::Result<Arc<dyn NotificationSink>> {
    match &config.notifications {
        Some(target) => {
            let notifier =
                DiscordNotifier::new(&target.service_url, &target.channel_id, &config.job_name)?;
            tracing::info!("Notifications go to {}", notifier.endpoint());
            Ok(Arc::new(notifier))
        }
        None => {
            tracing::warn!(
                "NOTIFICATION_SERVICE_URL or DISCORD_NOTIFICATION_CHANNEL_ID is not set. No notification will be sent"
            );
            Ok(Arc::new(LogNotifier::new(&config.job_name)))
        }
    }
}

pub fn build_runner(config: &Config) -> anyhow::Result<JobRunner> {
    let store = Arc::new(SheetsLedgerStore::new(&config.sheets)?);
    let provider = Arc::new(AmbitoProvider::new(&config.quote_source));
    let service = Arc::new(LedgerSyncService::new(store, provider));

    Ok(JobRunner::new(
        service,
        build_sink(config)?,
        config.max_allowed_time,
        config.timezone,
    ))
}

/// Runs the job once and pushes run metrics when a gateway is configured.
pub async fn run_once(config: &Config) -> anyhow::Result<RunOutcome> {
    let runner = build_runner(config)?;
    let outcome = runner.run().await;
    publish_metrics(config, &outcome).await;
    Ok(outcome)
}

async fn publish_metrics(config: &Config, outcome: &RunOutcome) {
    let Some(gateway_url) = config.pushgateway_url.as_deref() else {
        tracing::warn!("PROMETHEUS_PUSHGATEWAY_URL is not set. Metrics will not be pushed");
        return;
    };

    let result = async {
        let metrics = RunMetrics::new()?;
        metrics.record(outcome, chrono::Utc::now().timestamp_millis());
        metrics.push(gateway_url).await
    }
    .await;

    match result {
        Ok(()) => tracing::info!("Pushed run metrics to {}", gateway_url),
        Err(e) => tracing::warn!("Failed to push run metrics: {:#}", e),
    }
}
