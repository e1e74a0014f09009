use async_trait::async_trait;

use crate::core::AppConfig;
use crate::openai::{
    CompletionError, CompletionOptions, Message, Role, completion, first_choice_text,
};

pub const SYSTEM_MESSAGE: &str = "You are a professional email writing assistant. Generate well-structured, appropriate emails based on the user's requirements. Focus on clarity, professionalism, and effectiveness.";

/// Something that can turn a prompt into an email body. Exactly one
/// attempt is made per call.
#[async_trait]
pub trait EmailWriter: Send + Sync {
    async fn write(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Drafts emails with an OpenAI compatible chat completions API.
#[derive(Clone, Debug)]
pub struct OpenAiEmailWriter {
    api_hostname: String,
    api_key: String,
    model: String,
    options: CompletionOptions,
}

impl OpenAiEmailWriter {
    pub fn new(api_hostname: &str, api_key: &str, model: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            options: CompletionOptions::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.openai_api_hostname,
            &config.openai_api_key,
            &config.openai_model,
        )
    }
}

#[async_trait]
impl EmailWriter for OpenAiEmailWriter {
    async fn write(&self, prompt: &str) -> Result<String, CompletionError> {
        let messages = vec![
            Message::new(Role::System, SYSTEM_MESSAGE),
            Message::new(Role::User, prompt),
        ];
        tracing::debug!("Requesting email draft from model {}", self.model);

        let response = completion(
            &messages,
            &self.options,
            &self.api_hostname,
            &self.api_key,
            &self.model,
        )
        .await?;

        first_choice_text(&response)
    }
}
