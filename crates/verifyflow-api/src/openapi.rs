//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "VerifyFlow KYC API",
        version = "0.1.0",
        description = "KYC intake with identity, sanctions, PEP and adverse media screening; case listing and detail; dashboard statistics.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::kyc::submit_check,
        crate::routes::kyc::list_cases,
        crate::routes::kyc::get_case,
        crate::routes::stats::get_stats,
    ),
    components(schemas(
        verifyflow_core::ApplicantSubmission,
        verifyflow_core::CaseView,
        verifyflow_core::CaseId,
        verifyflow_core::CaseStatus,
        verifyflow_core::RiskLevel,
        verifyflow_core::CheckType,
        verifyflow_core::CheckStatus,
        verifyflow_core::StatsSnapshot,
        verifyflow_core::RiskDistribution,
        verifyflow_core::RiskBucket,
        crate::routes::kyc::CaseResponse,
        crate::routes::kyc::CaseListResponse,
        crate::routes::stats::StatsResponse,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "kyc", description = "KYC intake and case retrieval"),
        (name = "stats", description = "Dashboard statistics"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
