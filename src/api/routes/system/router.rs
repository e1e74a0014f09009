//! Router for health checks and unmatched API paths

use std::sync::Arc;

use axum::{
    Router,
    extract::OriginalUri,
    response::{IntoResponse, Json},
    routing::get,
};
use http::StatusCode;

use super::public;
use crate::api::state::AppState;
use crate::api::utils::timestamp_now;

type SharedState = Arc<AppState>;

pub async fn health_handler() -> Json<public::HealthResponse> {
    Json(public::HealthResponse {
        status: String::from("OK"),
        timestamp: timestamp_now(),
        message: String::from("AI Email Generator API is running!"),
    })
}

async fn test_handler() -> Json<public::TestResponse> {
    Json(public::TestResponse {
        success: true,
        message: String::from("API is working correctly!"),
        timestamp: timestamp_now(),
    })
}

/// JSON 404 for anything under `/api` that no route matched.
pub async fn api_not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    tracing::warn!("404 - Route not found: {}", uri);
    (
        StatusCode::NOT_FOUND,
        Json(public::RouteNotFound {
            error: String::from("API route not found"),
            requested_route: uri.to_string(),
            available_routes: public::AVAILABLE_ROUTES
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }),
    )
}

/// Create the system router
pub fn router() -> Router<SharedState> {
    Router::new().route("/test", get(test_handler))
}
