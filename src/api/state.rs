use std::sync::Arc;

use crate::ai::{EmailWriter, OpenAiEmailWriter};
use crate::core::AppConfig;
use crate::mailer::{MailSender, build_sender};

/// Everything a request handler needs. Built once at startup and
/// never mutated afterwards.
pub struct AppState {
    pub writer: Arc<dyn EmailWriter>,
    pub mailer: Arc<dyn MailSender>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        writer: Arc<dyn EmailWriter>,
        mailer: Arc<dyn MailSender>,
        config: AppConfig,
    ) -> Self {
        Self {
            writer,
            mailer,
            config,
        }
    }

    /// Wire up the OpenAI writer and whichever sender is configured.
    pub fn from_config(config: AppConfig) -> Self {
        let writer = Arc::new(OpenAiEmailWriter::from_config(&config));
        let mailer = build_sender(&config);
        tracing::info!("Using '{}' mail sender", mailer.name());
        Self::new(writer, mailer, config)
    }
}
