use anyhow::{Result, bail};
use clap::Args;

use crate::ai::prompt::email_prompt;
use crate::ai::{EmailWriter, OpenAiEmailWriter};
use crate::api::public::email::{EmailRequest, GeneratedEmail};
use crate::core::AppConfig;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(long)]
    sender_name: String,
    #[arg(long)]
    recipient_name: String,
    #[arg(long)]
    sender_email: Option<String>,
    #[arg(long)]
    recipient_email: Option<String>,
    #[arg(long)]
    subject: String,
    /// What kind of email this is, e.g. "follow-up" or "thank you"
    #[arg(long)]
    email_type: String,
    #[arg(long)]
    tone: Option<String>,
    #[arg(long)]
    context: Option<String>,
}

impl From<GenerateArgs> for EmailRequest {
    fn from(args: GenerateArgs) -> Self {
        EmailRequest {
            sender_name: Some(args.sender_name),
            recipient_name: Some(args.recipient_name),
            sender_email: args.sender_email,
            recipient_email: args.recipient_email,
            subject: Some(args.subject),
            email_type: Some(args.email_type),
            tone: args.tone,
            context: args.context,
        }
    }
}

pub async fn run(args: GenerateArgs, config: &AppConfig) -> Result<()> {
    let request = EmailRequest::from(args);
    let missing = request.missing_fields();
    if !missing.is_empty() {
        bail!("Missing required fields: {}", missing.join(", "));
    }

    let writer = OpenAiEmailWriter::from_config(config);
    let prompt = email_prompt(&request)?;
    let body = writer.write(&prompt).await?;
    let email = GeneratedEmail::from_request(&request, &body);
    println!("{}", serde_json::to_string_pretty(&email)?);

    Ok(())
}
