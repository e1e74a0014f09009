//! API routes module

pub mod email;
pub mod system;

use std::sync::Arc;

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<AppState>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Email generation and sending
        .merge(email::router())
        // Connectivity check
        .merge(system::router())
        // Anything else under /api gets a JSON 404
        .fallback(system::api_not_found)
}
