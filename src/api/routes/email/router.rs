//! Router for the email API

use std::sync::Arc;

use axum::{Router, extract::State, response::Json, routing::post};

use super::public;
use crate::ai::prompt::email_prompt;
use crate::api::extract::AppJson;
use crate::api::public::ApiError;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn generate_email_handler(
    State(state): State<SharedState>,
    AppJson(request): AppJson<public::EmailRequest>,
) -> Result<Json<public::GenerateEmailResponse>, ApiError> {
    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(ApiError::MissingFields(missing));
    }

    let prompt = email_prompt(&request)?;
    let body = state.writer.write(&prompt).await?;
    let email_data = public::GeneratedEmail::from_request(&request, &body);
    tracing::debug!("Generated {} email for {}", email_data.email_type, email_data.to);

    Ok(Json(public::GenerateEmailResponse {
        success: true,
        email_data,
    }))
}

async fn send_email_handler(
    State(state): State<SharedState>,
    AppJson(request): AppJson<public::SendEmailRequest>,
) -> Result<Json<public::SendEmailResponse>, ApiError> {
    tracing::info!(
        "Email send request to '{}' via {} sender",
        request.email_data.to,
        state.mailer.name()
    );

    let message_id = state
        .mailer
        .send(&request.email_data, request.access_token.as_deref())
        .await
        .map_err(|e| ApiError::SendFailed(e.to_string()))?;

    Ok(Json(public::SendEmailResponse {
        success: true,
        message: String::from("Email sent successfully!"),
        message_id,
    }))
}

/// Create the email router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/generate-email", post(generate_email_handler))
        .route("/send-email", post(send_email_handler))
}
