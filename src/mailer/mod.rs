//! Outbound mail delivery. The send endpoint only talks to a
//! `MailSender`; which implementation backs it is decided once at
//! startup from `MAIL_SENDER`.

mod gmail;
mod stub;

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::AppConfig;
use crate::google::gmail::GmailAuth;

pub use gmail::GmailMailSender;
pub use stub::StubMailSender;

/// The parts of a drafted email needed to deliver it. Anything else the
/// client sends along is ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmailDraft {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait MailSender: Send + Sync {
    /// Deliver the email and return an identifier for the sent message.
    async fn send(&self, email: &EmailDraft, access_token: Option<&str>) -> Result<String>;

    fn name(&self) -> &'static str;
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SenderKind {
    Stub,
    Gmail,
}

impl FromStr for SenderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "stub" => Ok(SenderKind::Stub),
            "gmail" => Ok(SenderKind::Gmail),
            other => Err(anyhow!("Unknown mail sender: {}", other)),
        }
    }
}

/// Construct the configured sender.
pub fn build_sender(config: &AppConfig) -> Arc<dyn MailSender> {
    match config.mail_sender {
        SenderKind::Stub => Arc::new(StubMailSender::new(config.send_delay())),
        SenderKind::Gmail => Arc::new(GmailMailSender::new(GmailAuth::new(
            &config.gmail_client_id,
            &config.gmail_client_secret,
            &config.gmail_redirect_uri,
        ))),
    }
}
