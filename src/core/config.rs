use std::env;
use std::time::Duration;

use anyhow::{Result, anyhow};

use crate::mailer::SenderKind;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub gmail_client_id: String,
    pub gmail_client_secret: String,
    pub gmail_redirect_uri: String,
    pub mail_sender: SenderKind,
    pub send_delay_ms: u64,
    pub static_dir: String,
    pub rate_limit_max: u32,
    pub rate_limit_window_secs: u64,
    pub trust_proxy: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_hostname: String::from("https://api.openai.com"),
            openai_api_key: String::new(),
            openai_model: String::from("gpt-3.5-turbo"),
            gmail_client_id: String::new(),
            gmail_client_secret: String::new(),
            gmail_redirect_uri: String::from("urn:ietf:wg:oauth:2.0:oob"),
            mail_sender: SenderKind::Stub,
            send_delay_ms: 1500,
            static_dir: String::from("./web-ui/src"),
            rate_limit_max: 100,
            rate_limit_window_secs: 15 * 60,
            trust_proxy: false,
        }
    }
}

impl AppConfig {
    /// Read the config from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup, falling back to the
    /// defaults for keys that are not set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("OPENAI_API_HOST") {
            config.openai_api_hostname = host;
        }
        if let Some(key) = lookup("OPENAI_API_KEY") {
            config.openai_api_key = key;
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            config.openai_model = model;
        }
        if let Some(id) = lookup("GOOGLE_CLIENT_ID") {
            config.gmail_client_id = id;
        }
        if let Some(secret) = lookup("GOOGLE_CLIENT_SECRET") {
            config.gmail_client_secret = secret;
        }
        if let Some(uri) = lookup("GOOGLE_REDIRECT_URI") {
            config.gmail_redirect_uri = uri;
        }
        if let Some(kind) = lookup("MAIL_SENDER") {
            config.mail_sender = kind.parse()?;
        }
        if let Some(delay) = lookup("SEND_DELAY_MS") {
            config.send_delay_ms = parse_number("SEND_DELAY_MS", &delay)?;
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            config.static_dir = dir;
        }
        if let Some(max) = lookup("RATE_LIMIT_MAX") {
            config.rate_limit_max = parse_number("RATE_LIMIT_MAX", &max)?;
        }
        if let Some(window) = lookup("RATE_LIMIT_WINDOW_SECS") {
            config.rate_limit_window_secs = parse_number("RATE_LIMIT_WINDOW_SECS", &window)?;
        }
        if let Some(trust) = lookup("TRUST_PROXY") {
            config.trust_proxy = parse_flag("TRUST_PROXY", &trust)?;
        }

        if config.openai_api_key.is_empty() {
            tracing::warn!("OPENAI_API_KEY is not set, email generation will fail");
        }

        Ok(config)
    }

    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| anyhow!("Invalid value for {}: {}", key, value))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(anyhow!("Invalid value for {}: {}", key, value)),
    }
}
