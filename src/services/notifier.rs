use crate::config::NotifierConfig;
use crate::error::{ServiceError, ServiceResult};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::info;

/// Outbound notification seam. Delivery is best-effort; callers log
/// failures and move on, they never retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> ServiceResult<()>;
}

/// Sends plain-text email through the Brevo transactional-mail HTTP API.
pub struct BrevoNotifier {
    client: reqwest::Client,
    config: NotifierConfig,
}

impl BrevoNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }
}

#[async_trait]
impl Notifier for BrevoNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> ServiceResult<()> {
        let payload = json!({
            "sender": { "email": self.config.sender },
            "to": [{ "email": to }],
            "subject": subject,
            "textContent": body,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .header("api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::Upstream(format!(
                "mail delivery to {to} failed: {}",
                response.status()
            )));
        }

        info!("Alert email sent to {}", to);
        Ok(())
    }
}
