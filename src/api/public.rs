//! Public API types

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::openai::CompletionError;

// Errors

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("OpenAI API quota exceeded")]
    QuotaExceeded,
    #[error("Invalid OpenAI API key")]
    InvalidApiKey,
    #[error("Failed to generate email: {0}")]
    GenerationFailed(String),
    #[error("Failed to send email: {0}")]
    SendFailed(String),
    #[error("Too many requests")]
    RateLimited,
    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<CompletionError> for ApiError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::QuotaExceeded(_) => ApiError::QuotaExceeded,
            CompletionError::InvalidApiKey(_) => ApiError::InvalidApiKey,
            CompletionError::Failed(msg) => ApiError::GenerationFailed(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            ApiError::QuotaExceeded => StatusCode::PAYMENT_REQUIRED,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::GenerationFailed(_) | ApiError::SendFailed(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        tracing::error!("{}", self);

        let body = match &self {
            ApiError::MissingFields(missing) => json!({
                "error": "Missing required fields",
                "required": email::REQUIRED_FIELDS,
                "missing": missing,
            }),
            ApiError::QuotaExceeded => json!({
                "error": "OpenAI API quota exceeded",
                "message": "Please check your OpenAI billing settings",
            }),
            ApiError::InvalidApiKey => json!({
                "error": "Invalid OpenAI API key",
                "message": "Please check your API key configuration",
            }),
            ApiError::GenerationFailed(msg) => json!({
                "error": "Failed to generate email",
                "message": msg,
            }),
            ApiError::SendFailed(msg) => json!({
                "error": "Failed to send email",
                "message": msg,
            }),
            ApiError::RateLimited => json!({
                "error": "Too many requests",
                "message": "Too many requests from this IP, please try again later.",
            }),
            ApiError::InvalidBody { status, message } => {
                let error = if *status == StatusCode::PAYLOAD_TOO_LARGE {
                    "Request body too large"
                } else {
                    "Invalid request body"
                };
                json!({ "error": error, "message": message })
            }
            // Internal details stay in the logs
            ApiError::Internal(_) => json!({
                "error": "Something went wrong!",
                "message": "Internal server error",
            }),
        };

        (self.status(), Json(body)).into_response()
    }
}

// Re-export public types from each route

pub mod email {
    pub use crate::api::routes::email::public::*;
}

pub mod system {
    pub use crate::api::routes::system::public::*;
}
