//! Reusable prompts using Handlebars for templating. Handlebars adds
//! additional security controls since it can't do much out of the box
//! without registering your own helpers. Values interpolated here come
//! straight from the user's form so nothing beyond plain substitution
//! is allowed.

use std::fmt;
use std::sync::LazyLock;

use anyhow::{Result, anyhow};
use handlebars::{Handlebars, TemplateError};
use serde_json::json;

use crate::api::public::email::EmailRequest;

pub const DEFAULT_TONE: &str = "professional";
pub const DEFAULT_CONTEXT: &str = "No additional context provided";

#[derive(Debug)]
pub enum Prompt {
    GenerateEmail,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<Prompt> for String {
    fn from(item: Prompt) -> String {
        format!("{:?}", item)
    }
}

const GENERATE_EMAIL_PROMPT: &str = r#"Generate a professional email with the following specifications:

**Email Details:**
- From: {{sender_name}} ({{sender_email}})
- To: {{recipient_name}} ({{recipient_email}})
- Subject: {{subject}}
- Type: {{email_type}}
- Tone: {{tone}}
- Context: {{context}}

**Instructions:**
1. Write a {{tone}} email for {{email_type}}
2. Use appropriate greeting and closing
3. Keep it concise but complete
4. Include relevant details from the context
5. Make it sound natural and human-like
6. Use proper email formatting

**Response Format:**
Return ONLY the email body content (no subject line, no "From/To" headers). Start directly with the greeting."#;

fn templates() -> Result<Handlebars<'static>, TemplateError> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // Prompts are plain text, HTML escaping would mangle names like "O'Brien"
    registry.register_escape_fn(handlebars::no_escape);
    registry.register_template_string(&Prompt::GenerateEmail.to_string(), GENERATE_EMAIL_PROMPT)?;
    Ok(registry)
}

// Compiled on first use and shared by every request after that
static TEMPLATES: LazyLock<Result<Handlebars<'static>, String>> =
    LazyLock::new(|| templates().map_err(|e| e.to_string()));

/// Render the instruction sent to the model for a validated request.
pub fn email_prompt(request: &EmailRequest) -> Result<String> {
    let tone = request.tone_or_default();
    let context = request
        .context
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CONTEXT);

    let registry = TEMPLATES
        .as_ref()
        .map_err(|e| anyhow!("Failed to register template: {}", e))?;
    let content = registry.render(
        &Prompt::GenerateEmail.to_string(),
        &json!({
            "sender_name": request.sender_name.as_deref().unwrap_or_default(),
            "sender_email": request.sender_email.as_deref().unwrap_or_default(),
            "recipient_name": request.recipient_name.as_deref().unwrap_or_default(),
            "recipient_email": request.recipient_email.as_deref().unwrap_or_default(),
            "subject": request.subject.as_deref().unwrap_or_default(),
            "email_type": request.email_type.as_deref().unwrap_or_default(),
            "tone": tone,
            "context": context,
        }),
    )?;

    Ok(content)
}
