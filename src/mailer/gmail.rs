use anyhow::{Result, anyhow};
use async_trait::async_trait;

use super::{EmailDraft, MailSender};
use crate::google::gmail::GmailAuth;
use crate::google::oauth::OAuthCredentials;

/// Delivers mail through the Gmail API as the authenticated user.
#[derive(Debug)]
pub struct GmailMailSender {
    auth: GmailAuth,
}

impl GmailMailSender {
    pub fn new(auth: GmailAuth) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl MailSender for GmailMailSender {
    async fn send(&self, email: &EmailDraft, access_token: Option<&str>) -> Result<String> {
        // Each request brings its own token; nothing is kept between sends
        let token = access_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| anyhow!("No Gmail access token provided"))?;
        let credentials = OAuthCredentials::from_access_token(token);
        let sent = self.auth.send_email(&credentials, email).await?;
        Ok(sent.id)
    }

    fn name(&self) -> &'static str {
        "gmail"
    }
}
