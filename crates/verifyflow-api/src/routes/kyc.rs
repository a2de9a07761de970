//! # KYC Routes
//!
//! Intake, listing and detail for KYC cases.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use verifyflow_core::{project_case, project_cases, ApplicantSubmission, CaseView, CoreError};

use super::{method_not_allowed, options_ok};
use crate::error::AppError;
use crate::extractors::extract_json;
use crate::orchestration::process_intake;
use crate::state::AppState;

/// A single case.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CaseResponse {
    pub success: bool,
    pub case: CaseView,
}

/// All cases, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CaseListResponse {
    pub success: bool,
    pub cases: Vec<CaseView>,
    pub total: usize,
}

/// Build the KYC router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/kyc/check",
            post(submit_check)
                .options(options_ok)
                .fallback(method_not_allowed),
        )
        .route(
            "/kyc/cases",
            get(list_cases)
                .options(options_ok)
                .fallback(method_not_allowed),
        )
        .route(
            "/kyc/case",
            get(missing_case_id)
                .options(options_ok)
                .fallback(method_not_allowed),
        )
        .route(
            "/kyc/case/",
            get(missing_case_id)
                .options(options_ok)
                .fallback(method_not_allowed),
        )
        .route(
            "/kyc/case/{id}",
            get(get_case)
                .options(options_ok)
                .fallback(method_not_allowed),
        )
}

/// POST /kyc/check - Submit an applicant for KYC screening.
///
/// Validates the payload, runs all four checks, persists the case with its
/// check rows and returns the projected case.
#[utoipa::path(
    post,
    path = "/kyc/check",
    request_body = ApplicantSubmission,
    responses(
        (status = 200, description = "Case created", body = CaseResponse),
        (status = 400, description = "Missing fields or malformed body", body = crate::error::ErrorBody),
        (status = 500, description = "Check or store failure", body = crate::error::ErrorBody),
    ),
    tag = "kyc"
)]
async fn submit_check(
    State(state): State<AppState>,
    body: Result<Json<ApplicantSubmission>, JsonRejection>,
) -> Result<Json<CaseResponse>, AppError> {
    let submission = extract_json(body)?;
    let case = process_intake(&state, &submission).await?;
    Ok(Json(CaseResponse {
        success: true,
        case,
    }))
}

/// GET /kyc/cases - List all cases, newest first.
#[utoipa::path(
    get,
    path = "/kyc/cases",
    responses(
        (status = 200, description = "All cases", body = CaseListResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    tag = "kyc"
)]
async fn list_cases(State(state): State<AppState>) -> Result<Json<CaseListResponse>, AppError> {
    let stored = state.store.list_cases().await?;
    let cases = project_cases(&stored);
    Ok(Json(CaseListResponse {
        success: true,
        total: cases.len(),
        cases,
    }))
}

/// GET /kyc/case/{id} - Get one case with its checks.
#[utoipa::path(
    get,
    path = "/kyc/case/{id}",
    params(("id" = String, Path, description = "Case ID, e.g. KYC-2025-001")),
    responses(
        (status = 200, description = "Case found", body = CaseResponse),
        (status = 400, description = "Blank case id", body = crate::error::ErrorBody),
        (status = 404, description = "No such case", body = crate::error::ErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    tag = "kyc"
)]
async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CaseResponse>, AppError> {
    if id.trim().is_empty() {
        return Err(AppError::MissingCaseId);
    }

    let stored = state.store.get_case(&id).await?;
    let (case, checks) = match &stored {
        Some(s) => (Some(&s.case), s.checks.as_slice()),
        None => (None, &[][..]),
    };

    match project_case(case, checks) {
        Ok(case) => Ok(Json(CaseResponse {
            success: true,
            case,
        })),
        Err(CoreError::CaseNotFound) => Err(AppError::CaseNotFound { id }),
        Err(other) => Err(AppError::Internal(other.to_string())),
    }
}

/// GET /kyc/case - Detail requested without an id.
async fn missing_case_id() -> AppError {
    AppError::MissingCaseId
}
