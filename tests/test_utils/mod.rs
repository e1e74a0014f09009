//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use axum::{Router, body::Body, http::Request, response::Response};
use serde_json::Value;

use mailsmith::ai::EmailWriter;
use mailsmith::api::{AppState, app};
use mailsmith::core::AppConfig;
use mailsmith::mailer::{EmailDraft, MailSender, StubMailSender};
use mailsmith::openai::CompletionError;

type WriterResponse = Box<dyn Fn() -> Result<String, CompletionError> + Send + Sync>;

/// Stands in for the model service. Records every prompt it receives.
pub struct FakeWriter {
    response: WriterResponse,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeWriter {
    pub fn replying(text: &str) -> Arc<Self> {
        let text = text.to_string();
        Self::with(move || Ok(text.clone()))
    }

    pub fn failing<F>(err: F) -> Arc<Self>
    where
        F: Fn() -> CompletionError + Send + Sync + 'static,
    {
        Self::with(move || Err(err()))
    }

    fn with<F>(f: F) -> Arc<Self>
    where
        F: Fn() -> Result<String, CompletionError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            response: Box::new(f),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailWriter for FakeWriter {
    async fn write(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        (self.response)()
    }
}

/// A sender whose delivery always blows up.
pub struct BrokenSender;

#[async_trait]
impl MailSender for BrokenSender {
    async fn send(&self, _email: &EmailDraft, _access_token: Option<&str>) -> anyhow::Result<String> {
        Err(anyhow!("SMTP relay unreachable"))
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

/// Config pointing at the real web UI with no send delay.
pub fn test_config() -> AppConfig {
    AppConfig {
        openai_api_key: String::from("test-api-key"),
        send_delay_ms: 0,
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/web-ui/src").to_string(),
        ..AppConfig::default()
    }
}

pub fn test_app_with(
    writer: Arc<dyn EmailWriter>,
    mailer: Arc<dyn MailSender>,
    config: AppConfig,
) -> Router {
    let app_state = AppState::new(writer, mailer, config);
    app(Arc::new(app_state))
}

/// Creates a test application router with a fake model and the stub
/// sender.
pub fn test_app(writer: Arc<FakeWriter>) -> Router {
    test_app_with(
        writer,
        Arc::new(StubMailSender::new(Duration::ZERO)),
        test_config(),
    )
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// POST an arbitrary body, optionally without a content type.
pub fn post_raw(uri: &str, body: impl Into<Body>, content_type: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(body.into()).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_to_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_to_json(response: Response) -> Value {
    serde_json::from_str(&body_to_string(response).await).unwrap()
}
