//! Integration tests for the HTTP shell: health checks, fallbacks,
//! headers and rate limiting

mod test_utils;

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;
    use serde_json::json;
    use tower::util::ServiceExt;

    use mailsmith::core::AppConfig;
    use mailsmith::mailer::StubMailSender;

    use crate::test_utils::{
        FakeWriter, body_to_json, body_to_string, get, post_json, test_app, test_app_with,
        test_config,
    };

    /// Tests the health check reports OK
    #[tokio::test]
    async fn it_returns_health_status() {
        let app = test_app(FakeWriter::replying("unused"));

        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_to_json(response).await;
        assert_eq!(json["status"], "OK");
        assert!(json["timestamp"].is_string());
    }

    /// Tests the API connectivity check
    #[tokio::test]
    async fn it_returns_api_test_response() {
        let app = test_app(FakeWriter::replying("unused"));

        let response = app.oneshot(get("/api/test")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_to_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "API is working correctly!");
        assert!(json["timestamp"].is_string());
    }

    /// Tests unknown API paths return a JSON 404 listing the routes
    #[tokio::test]
    async fn it_returns_404_for_unknown_api_route() {
        let app = test_app(FakeWriter::replying("unused"));

        let response = app.oneshot(get("/api/does-not-exist")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_to_json(response).await;
        assert_eq!(json["error"], "API route not found");
        assert_eq!(json["requestedRoute"], "/api/does-not-exist");
        assert_eq!(
            json["availableRoutes"],
            json!(["/api/generate-email", "/api/send-email", "/api/test"])
        );
    }

    /// Tests unknown API paths with a POST also get the JSON 404
    #[tokio::test]
    async fn it_returns_404_for_unknown_api_post() {
        let app = test_app(FakeWriter::replying("unused"));

        let response = app
            .oneshot(post_json("/api/generate", &json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    /// Tests the root serves the single-page shell
    #[tokio::test]
    async fn it_serves_the_app_shell_at_root() {
        let app = test_app(FakeWriter::replying("unused"));

        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response).await;
        assert!(body.contains("<title>AI Email Generator</title>"));
    }

    /// Tests unknown non-API paths fall back to the single-page shell
    #[tokio::test]
    async fn it_serves_the_app_shell_for_unknown_paths() {
        let app = test_app(FakeWriter::replying("unused"));

        let response = app.oneshot(get("/drafts/123")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["cache-control"], "no-cache");
        let body = body_to_string(response).await;
        assert!(body.contains("<title>AI Email Generator</title>"));
    }

    /// Tests static assets are served as-is
    #[tokio::test]
    async fn it_serves_static_assets() {
        let app = test_app(FakeWriter::replying("unused"));

        let response = app.oneshot(get("/app.js")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response).await;
        assert!(body.contains("generateEmail"));
    }

    /// Tests security headers are set on API and static responses
    #[tokio::test]
    async fn it_sets_security_headers() {
        let app = test_app(FakeWriter::replying("unused"));

        for uri in ["/api/test", "/", "/health"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            let headers = response.headers();
            assert_eq!(headers["x-content-type-options"], "nosniff", "{}", uri);
            assert_eq!(headers["x-frame-options"], "SAMEORIGIN", "{}", uri);
        }
    }

    /// Tests API routes are rate limited but the health check is not
    #[tokio::test]
    async fn it_rate_limits_api_routes() {
        let config = AppConfig {
            rate_limit_max: 2,
            ..test_config()
        };
        let app = test_app_with(
            FakeWriter::replying("unused"),
            Arc::new(StubMailSender::new(Duration::ZERO)),
            config,
        );

        for _ in 0..2 {
            let response = app.clone().oneshot(get("/api/test")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let limited = app.clone().oneshot(get("/api/test")).await.unwrap();
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
        let json = body_to_json(limited).await;
        assert_eq!(json["error"], "Too many requests");

        let health = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);
    }

    /// Tests the request budget comes back once the window has passed
    #[tokio::test]
    async fn it_resets_the_rate_limit_after_the_window() {
        let config = AppConfig {
            rate_limit_max: 1,
            rate_limit_window_secs: 1,
            ..test_config()
        };
        let app = test_app_with(
            FakeWriter::replying("unused"),
            Arc::new(StubMailSender::new(Duration::ZERO)),
            config,
        );

        let first = app.clone().oneshot(get("/api/test")).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let limited = app.clone().oneshot(get("/api/test")).await.unwrap();
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);

        tokio::time::sleep(Duration::from_millis(1100)).await;

        let after = app.oneshot(get("/api/test")).await.unwrap();
        assert_eq!(after.status(), StatusCode::OK);
    }

    /// Tests a forged forwarded-for header does not reset the budget
    /// unless the proxy is trusted
    #[tokio::test]
    async fn it_ignores_forwarded_for_unless_trusted() {
        let forwarded = |ip: &str| {
            axum::http::Request::builder()
                .uri("/api/test")
                .header("x-forwarded-for", ip)
                .body(axum::body::Body::empty())
                .unwrap()
        };

        let untrusted = test_app_with(
            FakeWriter::replying("unused"),
            Arc::new(StubMailSender::new(Duration::ZERO)),
            AppConfig {
                rate_limit_max: 1,
                ..test_config()
            },
        );
        let first = untrusted.clone().oneshot(forwarded("10.0.0.1")).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let rotated = untrusted.oneshot(forwarded("10.0.0.2")).await.unwrap();
        assert_eq!(rotated.status(), StatusCode::TOO_MANY_REQUESTS);

        let trusted = test_app_with(
            FakeWriter::replying("unused"),
            Arc::new(StubMailSender::new(Duration::ZERO)),
            AppConfig {
                rate_limit_max: 1,
                trust_proxy: true,
                ..test_config()
            },
        );
        let first = trusted.clone().oneshot(forwarded("10.0.0.1")).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let other_client = trusted.oneshot(forwarded("10.0.0.2")).await.unwrap();
        assert_eq!(other_client.status(), StatusCode::OK);
    }
}
