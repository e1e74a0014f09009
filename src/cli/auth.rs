use anyhow::{Result, bail};
use std::io::{self, Write};

use crate::core::AppConfig;
use crate::google::gmail::GmailAuth;

pub async fn run(config: &AppConfig) -> Result<()> {
    if config.gmail_client_id.is_empty() || config.gmail_client_secret.is_empty() {
        bail!("Set GOOGLE_CLIENT_ID and GOOGLE_CLIENT_SECRET in your environment");
    }

    let gmail = GmailAuth::new(
        &config.gmail_client_id,
        &config.gmail_client_secret,
        &config.gmail_redirect_uri,
    );
    println!(
        "\nPlease open the following URL in your browser and authorize access:\n\n{}\n",
        gmail.auth_url()
    );
    print!("Paste the authorization code shown by Google here: ");
    io::stdout().flush()?;
    let mut code = String::new();
    io::stdin().read_line(&mut code)?;
    let code = code.trim();
    if code.is_empty() {
        bail!("No authorization code provided");
    }

    let credentials = gmail.get_tokens(code).await?;
    println!("{}", serde_json::to_string_pretty(&credentials)?);

    Ok(())
}
