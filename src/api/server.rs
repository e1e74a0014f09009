use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::get;
use axum::{Router, extract::Request, response::Response};
use http::{HeaderValue, header};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::middleware::{RateLimiter, rate_limit, set_security_headers};
use super::routes;
use crate::api::state::AppState;
use crate::core::AppConfig;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

async fn set_static_cache_control(request: Request, next: middleware::Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}

pub fn app(shared_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::permissive();
    let config = &shared_state.config;
    let rate_limiter = RateLimiter::new(config.rate_limit_max, config.rate_limit_window())
        .trust_proxy(config.trust_proxy);

    // Unknown paths outside of /api get the single-page shell so the
    // browser can handle them
    let static_dir = Path::new(&config.static_dir);
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/health", get(routes::system::health_handler))
        // API routes, rate limited per client address
        .nest(
            "/api",
            routes::router().layer(middleware::from_fn_with_state(rate_limiter, rate_limit)),
        )
        // Static server of assets in ./web-ui
        .fallback_service(
            ServiceBuilder::new()
                .layer(middleware::from_fn(set_static_cache_control))
                .service(spa),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(set_security_headers))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::clone(&shared_state))
}

// Run the server
pub async fn serve(host: String, port: String, config: AppConfig) -> Result<()> {
    let app_state = AppState::from_config(config);
    let shared_state = Arc::new(app_state);
    let app = app(Arc::clone(&shared_state));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    let addr = listener.local_addr()?;

    tracing::info!("Server running on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Test API: http://{}/api/test", addr);

    // Connect info is needed to rate limit by client address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
