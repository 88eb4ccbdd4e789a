//! Notification sinks for run outcomes.

use async_trait::async_trait;
use log::{debug, info, warn};
use std::time::Duration;

use dollar_sheets_core::notifications::{NotificationSink, RunOutcome};

use crate::error::{NotifierError, Result};
use crate::format::build_message;
use crate::types::DiscordMessage;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Posts Discord messages through the notification service.
#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    client: reqwest::Client,
    endpoint: String,
    job_name: String,
}

impl DiscordNotifier {
    /// # Arguments
    ///
    /// * `service_url` - Base URL of the notification service
    /// * `channel_id` - Discord channel the service should post to
    /// * `job_name` - Name shown in message headlines
    pub fn new(service_url: &str, channel_id: &str, job_name: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint: discord_endpoint(service_url, channel_id),
            job_name: job_name.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, message: &DiscordMessage) -> Result<()> {
        debug!("Posting notification to {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(message).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifierError::api(status.as_u16(), body));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for DiscordNotifier {
    async fn notify(&self, outcome: &RunOutcome) -> dollar_sheets_core::Result<()> {
        let message = build_message(&self.job_name, outcome);
        self.post(&message).await?;
        info!("Sent {} notification", outcome.label());
        Ok(())
    }
}

/// Stand-in used when no notification channel is configured.
///
/// Logs the payload that would have been sent.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    job_name: String,
}

impl LogNotifier {
    pub fn new(job_name: &str) -> Self {
        Self {
            job_name: job_name.to_string(),
        }
    }
}

#[async_trait]
impl NotificationSink for LogNotifier {
    async fn notify(&self, outcome: &RunOutcome) -> dollar_sheets_core::Result<()> {
        let message = build_message(&self.job_name, outcome);
        warn!("Notification channel is not configured, no notification will be sent");
        match serde_json::to_string(&message) {
            Ok(payload) => info!("{}", payload),
            Err(e) => warn!("Failed to render notification payload: {}", e),
        }
        Ok(())
    }
}

fn discord_endpoint(service_url: &str, channel_id: &str) -> String {
    format!(
        "{}/notification/discord/{}",
        service_url.trim_end_matches('/'),
        urlencoding::encode(channel_id.trim())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discord_endpoint() {
        let notifier =
            DiscordNotifier::new("http://notifier:3000/", "1234567890", "job").unwrap();
        assert_eq!(
            notifier.endpoint(),
            "http://notifier:3000/notification/discord/1234567890"
        );
    }

    #[tokio::test]
    async fn test_log_notifier_never_fails() {
        let notifier = LogNotifier::new("job");
        assert!(notifier.notify(&RunOutcome::NoRowsToAppend).await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_notification_error() {
        let notifier = DiscordNotifier::new("http://127.0.0.1:9", "1", "job").unwrap();
        let err = notifier
            .notify(&RunOutcome::NoRowsToAppend)
            .await
            .unwrap_err();
        assert!(matches!(err, dollar_sheets_core::Error::Notification(_)));
    }
}
