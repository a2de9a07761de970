//! # Prometheus Metrics
//!
//! Request counters recorded through the `metrics` facade. The binary
//! installs a `metrics-exporter-prometheus` recorder and keeps its handle in
//! [`AppState`]; without a recorder the macros are no-ops and `/metrics`
//! renders an empty body.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Middleware that increments request and error counters.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();

    let response = next.run(request).await;

    let status = response.status();
    metrics::counter!(
        "verifyflow_http_requests_total",
        "method" => method.clone(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    if status.is_client_error() || status.is_server_error() {
        metrics::counter!(
            "verifyflow_http_errors_total",
            "method" => method,
            "status" => status.as_u16().to_string()
        )
        .increment(1);
    }

    response
}

/// GET /metrics - Prometheus text exposition.
pub async fn render(State(state): State<AppState>) -> String {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    #[tokio::test]
    async fn middleware_passes_response_through() {
        let app = Router::new()
            .route("/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
            .layer(axum::middleware::from_fn(metrics_middleware));
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/teapot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn render_without_recorder_is_empty() {
        let body = render(State(AppState::new())).await;
        assert!(body.is_empty());
    }
}
