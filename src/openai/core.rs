use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Message {
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: Some(content.to_string()),
        }
    }
}

/// Sampling parameters sent along with every completion request.
#[derive(Clone, Debug)]
pub struct CompletionOptions {
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}

/// Failures surfaced by the chat completions API, grouped by how the
/// caller is expected to react to them.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("OpenAI API quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("Invalid OpenAI API key: {0}")]
    InvalidApiKey(String),
    #[error("{0}")]
    Failed(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::Failed(err.to_string())
    }
}

// Error payloads look like this:
//
// {
//     "error": {
//         "message": "You exceeded your current quota...",
//         "type": "insufficient_quota",
//         "param": null,
//         "code": "insufficient_quota"
//     }
// }
fn classify_error(status: reqwest::StatusCode, body: &Value) -> CompletionError {
    let error = &body["error"];
    let message = error["message"]
        .as_str()
        .map(String::from)
        .unwrap_or_else(|| format!("Completion request failed with status {}", status));

    match error["code"].as_str() {
        Some("insufficient_quota") => CompletionError::QuotaExceeded(message),
        Some("invalid_api_key") => CompletionError::InvalidApiKey(message),
        _ if status == reqwest::StatusCode::UNAUTHORIZED => CompletionError::InvalidApiKey(message),
        _ => CompletionError::Failed(message),
    }
}

/// Send a single chat completion request and return the raw JSON
/// response. Non-2xx responses and error payloads are mapped to a
/// `CompletionError`.
pub async fn completion(
    messages: &[Message],
    options: &CompletionOptions,
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<Value, CompletionError> {
    let payload = json!({
        "model": model,
        "messages": messages,
        "max_tokens": options.max_tokens,
        "temperature": options.temperature,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60))
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;
    let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

    if !status.is_success() || !body["error"].is_null() {
        return Err(classify_error(status, &body));
    }

    Ok(body)
}

/// Pull the trimmed text content out of the first choice.
pub fn first_choice_text(response: &Value) -> Result<String, CompletionError> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| {
            CompletionError::Failed(String::from("Completion response contained no choices"))
        })
}
