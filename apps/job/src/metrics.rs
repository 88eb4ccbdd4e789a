//! Run metrics pushed to a Prometheus pushgateway.

use std::time::Duration;

use anyhow::Context;
use prometheus::{Encoder, IntGauge, Opts, Registry, TextEncoder};

use dollar_sheets_core::notifications::RunOutcome;

pub const METRICS_JOB_NAME: &str = "dollar-data-to-google-spreadsheets";

const PUSH_TIMEOUT: Duration = Duration::from_secs(10);

pub struct RunMetrics {
    registry: Registry,
    last_job_run: IntGauge,
    rows_appended: IntGauge,
}

impl RunMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();
        let last_job_run = IntGauge::with_opts(Opts::new(
            "dollar_data_to_google_spreadsheets_last_job_run",
            "Last time the job was run",
        ))?;
        registry.register(Box::new(last_job_run.clone()))?;
        let rows_appended = IntGauge::with_opts(Opts::new(
            "dollar_data_to_google_spreadsheets_rows_appended",
            "Rows appended to the ledger by the last run",
        ))?;
        registry.register(Box::new(rows_appended.clone()))?;

        Ok(Self {
            registry,
            last_job_run,
            rows_appended,
        })
    }

    pub fn record(&self, outcome: &RunOutcome, finished_at_ms: i64) {
        self.last_job_run.set(finished_at_ms);
        self.rows_appended.set(outcome.rows_appended() as i64);
    }

    /// Text exposition of every registered metric.
    pub fn render(&self) -> anyhow::Result<Vec<u8>> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&metric_families, &mut buffer)?;
        Ok(buffer)
    }

    /// Replaces this job's metric group on the pushgateway.
    pub async fn push(&self, gateway_url: &str) -> anyhow::Result<()> {
        let body = self.render()?;
        let response = reqwest::Client::builder()
            .timeout(PUSH_TIMEOUT)
            .build()?
            .put(push_url(gateway_url))
            .header(reqwest::header::CONTENT_TYPE, TextEncoder::new().format_type())
            .body(body)
            .send()
            .await
            .context("pushgateway request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("pushgateway answered {}", status);
        }
        Ok(())
    }
}

fn push_url(gateway_url: &str) -> String {
    format!(
        "{}/metrics/job/{}",
        gateway_url.trim_end_matches('/'),
        METRICS_JOB_NAME
    )
}
