use std::process::ExitCode;

use dollar_sheets_job::config::Config;
use dollar_sheets_job::{init_tracing, run_once};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let config = Config::from_env()?;
    tracing::info!(
        "Starting {} (sheet '{}', timezone {})",
        config.job_name,
        config.sheets.sheet_title,
        config.timezone
    );

    let outcome = run_once(&config).await?;
    if outcome.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
