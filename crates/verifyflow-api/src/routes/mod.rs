//! # Route Modules
//!
//! - [`kyc`]: intake, case listing and case detail under `/kyc/*`.
//! - [`stats`]: the dashboard statistics snapshot at `/stats`.
//!
//! Every listed path answers `OPTIONS` with an empty 200 and any other
//! unlisted method with a JSON 405.

pub mod kyc;
pub mod stats;

use axum::http::StatusCode;

use crate::error::AppError;

/// `OPTIONS` on a listed path. CORS headers come from the outer layer.
pub(crate) async fn options_ok() -> StatusCode {
    StatusCode::OK
}

/// Method fallback for listed paths.
pub(crate) async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
