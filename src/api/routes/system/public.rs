//! Public types for health checks and API discovery
use serde::{Deserialize, Serialize};

pub const AVAILABLE_ROUTES: [&str; 3] = ["/api/generate-email", "/api/send-email", "/api/test"];

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct TestResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNotFound {
    pub error: String,
    pub requested_route: String,
    pub available_routes: Vec<String>,
}
