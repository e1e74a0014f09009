//! Gmail API client for sending drafted emails on behalf of a user
//! that went through the OAuth consent flow.

use anyhow::bail;
use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::oauth::{
    GMAIL_SEND_SCOPE, OAuthCredentials, TOKEN_ENDPOINT, authorization_url,
    exchange_code_for_token_at,
};
use crate::mailer::EmailDraft;

pub const GMAIL_API_BASE: &str = "https://gmail.googleapis.com";

/// Response from `users.messages.send`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MessageResponse {
    pub id: String,
    #[serde(rename = "threadId")]
    pub thread_id: String,
    #[serde(rename = "labelIds")]
    pub label_ids: Option<Vec<String>>,
}

/// OAuth client settings plus the HTTP client used to talk to Google.
/// Never holds a user's credentials; callers pass them per call.
#[derive(Debug)]
pub struct GmailAuth {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    token_endpoint: String,
    api_base: String,
    client: Client,
}

impl GmailAuth {
    pub fn new(client_id: &str, client_secret: &str, redirect_uri: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_uri: redirect_uri.to_string(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
            api_base: GMAIL_API_BASE.to_string(),
            client: Client::new(),
        }
    }

    /// Point the client at different Google endpoints (used in tests).
    pub fn with_endpoints(mut self, token_endpoint: &str, api_base: &str) -> Self {
        self.token_endpoint = token_endpoint.to_string();
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// URL the user should visit to grant the send-mail scope.
    pub fn auth_url(&self) -> String {
        authorization_url(&self.client_id, &self.redirect_uri, &[GMAIL_SEND_SCOPE])
    }

    /// Exchange an authorization code for the user's tokens.
    pub async fn get_tokens(&self, code: &str) -> Result<OAuthCredentials, anyhow::Error> {
        exchange_code_for_token_at(
            &self.client,
            &self.token_endpoint,
            &self.client_id,
            &self.client_secret,
            code,
            &self.redirect_uri,
        )
        .await
    }

    /// Send an email as the user the credentials belong to.
    pub async fn send_email(
        &self,
        credentials: &OAuthCredentials,
        email: &EmailDraft,
    ) -> Result<MessageResponse, anyhow::Error> {
        if credentials.access_token.trim().is_empty() {
            bail!("Gmail access token is empty");
        }

        let raw = make_body(&email.to, &email.from, &email.subject, &email.body);
        let url = format!("{}/gmail/v1/users/me/messages/send", self.api_base);
        let res = self
            .client
            .post(&url)
            .bearer_auth(&credentials.access_token)
            .json(&json!({ "raw": raw }))
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        if !status.is_success() {
            bail!("Send failed: {} ({})", status, text);
        }
        let sent: MessageResponse = serde_json::from_str(&text)?;
        tracing::info!("Sent Gmail message {}", sent.id);
        Ok(sent)
    }
}

/// Build a minimal plain text message and encode it the way the Gmail
/// API expects in the `raw` field.
pub fn make_body(to: &str, from: &str, subject: &str, message: &str) -> String {
    let str = [
        "Content-Type: text/plain; charset=\"UTF-8\"\n",
        "MIME-Version: 1.0\n",
        "Content-Transfer-Encoding: 7bit\n",
        &format!("to: {}\n", to),
        &format!("from: {}\n", from),
        &format!("subject: {}\n\n", subject),
        message,
    ]
    .join("");

    base64_url(&str)
}

/// Helper: base64url encode, padding kept
fn base64_url(input: &str) -> String {
    URL_SAFE.encode(input.as_bytes())
}
