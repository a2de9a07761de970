//! # CORS
//!
//! Any origin may call the API. Preflight requests are answered by the layer
//! itself with a 200 and an empty body; plain `OPTIONS` requests fall through
//! to the routers, which also answer 200.

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers([
            header::HeaderName::from_static("x-csrf-token"),
            header::HeaderName::from_static("x-requested-with"),
            header::ACCEPT,
            header::HeaderName::from_static("accept-version"),
            header::CONTENT_LENGTH,
            header::HeaderName::from_static("content-md5"),
            header::CONTENT_TYPE,
            header::DATE,
            header::HeaderName::from_static("x-api-version"),
        ])
}
