//! Public types for the email API
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::ai::prompt::DEFAULT_TONE;
use crate::api::utils::timestamp_now;
use crate::mailer::EmailDraft;

pub const REQUIRED_FIELDS: [&str; 4] = ["senderName", "recipientName", "subject", "emailType"];

/// The form the user filled out. Every field is optional at the wire
/// level so that missing fields can be reported together.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub sender_name: Option<String>,
    pub recipient_name: Option<String>,
    pub sender_email: Option<String>,
    pub recipient_email: Option<String>,
    pub subject: Option<String>,
    pub email_type: Option<String>,
    pub tone: Option<String>,
    pub context: Option<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or_default().is_empty()
}

impl EmailRequest {
    /// Names of the required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let values = [
            &self.sender_name,
            &self.recipient_name,
            &self.subject,
            &self.email_type,
        ];
        REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| is_blank(value))
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn tone_or_default(&self) -> &str {
        self.tone
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TONE)
    }
}

/// Render `Name <email>`, or just the name when no address was given.
pub fn format_address(name: &str, email: Option<&str>) -> String {
    match email.map(str::trim).filter(|e| !e.is_empty()) {
        Some(email) => format!("{} <{}>", name, email),
        None => name.to_string(),
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeneratedEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    #[serde(rename = "type")]
    pub email_type: String,
    pub tone: String,
    pub timestamp: String,
}

impl GeneratedEmail {
    pub fn from_request(request: &EmailRequest, body: &str) -> Self {
        let sender_name = request.sender_name.as_deref().unwrap_or_default();
        let recipient_name = request.recipient_name.as_deref().unwrap_or_default();
        Self {
            from: format_address(sender_name, request.sender_email.as_deref()),
            to: format_address(recipient_name, request.recipient_email.as_deref()),
            subject: request.subject.clone().unwrap_or_default(),
            body: body.trim().to_string(),
            email_type: request.email_type.clone().unwrap_or_default(),
            tone: request.tone_or_default().to_string(),
            timestamp: timestamp_now(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEmailResponse {
    pub success: bool,
    pub email_data: GeneratedEmail,
}

/// Whatever the browser posts to the send endpoint. Fields that are
/// missing, null or the wrong type fall back to their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    #[serde(default, deserialize_with = "or_default")]
    pub email_data: EmailDraft,
    // Only used by the Gmail sender
    #[serde(default, deserialize_with = "or_default")]
    pub access_token: Option<String>,
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub success: bool,
    pub message: String,
    pub message_id: String,
}
