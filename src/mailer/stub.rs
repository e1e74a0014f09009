use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{EmailDraft, MailSender};

/// Pretends to deliver mail. Waits for `latency` and hands back a
/// made-up message id without contacting any server.
#[derive(Clone, Debug)]
pub struct StubMailSender {
    latency: Duration,
}

impl StubMailSender {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl MailSender for StubMailSender {
    async fn send(&self, email: &EmailDraft, access_token: Option<&str>) -> Result<String> {
        tracing::info!(
            "Simulating send to '{}' with subject '{}' (access token provided: {})",
            email.to,
            email.subject,
            access_token.is_some()
        );
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(format!(
            "mock_message_id_{}_{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        ))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
