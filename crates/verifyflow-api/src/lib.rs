//! # verifyflow-api: Axum API Service for VerifyFlow
//!
//! HTTP front end for KYC intake and the compliance dashboard.
//!
//! ## API Surface
//!
//! | Method | Path                | Module              | Purpose                      |
//! |--------|---------------------|---------------------|------------------------------|
//! | POST   | `/kyc/check`        | [`routes::kyc`]     | Submit an applicant          |
//! | GET    | `/kyc/cases`        | [`routes::kyc`]     | All cases, newest first      |
//! | GET    | `/kyc/case/{id}`    | [`routes::kyc`]     | One case with its checks     |
//! | GET    | `/stats`            | [`routes::stats`]   | Dashboard statistics         |
//! | GET    | `/openapi.json`     | [`openapi`]         | OpenAPI document             |
//! | GET    | `/metrics`          | [`middleware::metrics`] | Prometheus exposition    |
//! | GET    | `/health/*`         | this module         | Liveness and readiness       |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! ## Storage
//!
//! Handlers reach cases only through the [`store::CaseStore`] trait object in
//! [`AppState`]. `main` picks PostgreSQL when `DATABASE_URL` is set and the
//! in-memory store otherwise.

pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod orchestration;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;

use axum::http::{Method, StatusCode, Uri};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the metrics and trace
/// layers so that probe traffic does not swamp request counters.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::kyc::router())
        .merge(routes::stats::router())
        .merge(openapi::router())
        .route("/metrics", get(middleware::metrics::render))
        .fallback(unmatched)
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new()
        .merge(health)
        .merge(api)
        .layer(middleware::cors::layer())
}

/// Liveness probe. Always 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. 200 once the router is serving.
async fn readiness() -> &'static str {
    "ready"
}

/// Fallback for unknown paths: `OPTIONS` gets an empty 200, anything else a
/// JSON 404.
async fn unmatched(method: Method, uri: Uri) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    AppError::NotFound(uri.path().to_string()).into_response()
}
