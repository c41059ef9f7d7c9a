//! Best-effort failure alerts posted to the configured webhook.

use std::sync::Arc;
use std::time::Duration;

use crate::metrics::{ALERTS_FAILED, ALERTS_SENT};
use crate::models::AlertPayload;
use crate::settings::{Settings, SettingsHandle};

pub const ALERT_SOURCE: &str = "OpenRouter Gateway";

/// What happened to a single alert attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    Sent(u16),
    Skipped,
    Failed(String),
}

#[derive(Clone)]
pub struct AlertNotifier {
    client: reqwest::Client,
    settings: SettingsHandle,
    timeout: Duration,
}

impl AlertNotifier {
    pub fn new(client: reqwest::Client, settings: SettingsHandle, timeout: Duration) -> Self {
        Self {
            client,
            settings,
            timeout,
        }
    }

    pub fn payload(error_message: &str, context: Option<serde_json::Value>) -> AlertPayload {
        AlertPayload {
            error_source: ALERT_SOURCE.to_string(),
            error_message: error_message.to_string(),
            original_request: context.unwrap_or_else(|| serde_json::json!({})),
        }
    }

    /// Fire and forget: spawn the alert on its own task and return at once.
    /// `settings` is the snapshot the failing request ran with, so the alert
    /// goes to the webhook paired with the key that was used.
    pub fn notify(
        &self,
        settings: Arc<Settings>,
        error_message: impl Into<String>,
        context: Option<serde_json::Value>,
    ) {
        let notifier = self.clone();
        let error_message = error_message.into();
        tokio::spawn(async move {
            notifier.send_with(&settings, &error_message, context).await;
        });
    }

    /// Post one alert using whatever settings are current.
    pub async fn send(&self, error_message: &str, context: Option<serde_json::Value>) -> AlertOutcome {
        let settings = self.settings.snapshot();
        self.send_with(&settings, error_message, context).await
    }

    // Never fails; the outcome is only logged and counted.
    pub async fn send_with(
        &self,
        settings: &Settings,
        error_message: &str,
        context: Option<serde_json::Value>,
    ) -> AlertOutcome {
        let Some(url) = settings.webhook_url.as_deref() else {
            tracing::error!("Webhook URL is not configured, alert cannot be sent.");
            return AlertOutcome::Skipped;
        };

        let payload = Self::payload(error_message, context);
        let result = self
            .client
            .post(url)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .and_then(|res| res.error_for_status());

        match result {
            Ok(res) => {
                ALERTS_SENT.inc();
                tracing::info!("Webhook alert sent successfully. Status: {}", res.status().as_u16());
                AlertOutcome::Sent(res.status().as_u16())
            }
            Err(e) => {
                ALERTS_FAILED.inc();
                tracing::error!("Error occurred while sending webhook alert: {}", e);
                AlertOutcome::Failed(e.to_string())
            }
        }
    }
}
