//! # Intake Orchestration
//!
//! Runs one KYC submission end to end:
//!
//! ```text
//! validate → processing delay → run checks → build case → store (atomic) → project
//! ```
//!
//! Nothing is written unless every check has produced an outcome. The case
//! row and its check rows are written in a single store call, so a failure
//! at that step leaves no partial case behind.

use chrono::Utc;
use verifyflow_core::{build_case, project_case, validate, ApplicantSubmission, CaseView};

use crate::error::AppError;
use crate::state::AppState;

/// Validate, screen, persist and project a new applicant.
pub async fn process_intake(
    state: &AppState,
    submission: &ApplicantSubmission,
) -> Result<CaseView, AppError> {
    let applicant = validate(submission)?;

    let delay = state.config.processing_delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let outcomes = state.checks.run_checks(&applicant).await?;
    let stored = build_case(&applicant, &outcomes, state.policy.as_ref(), Utc::now());

    state.store.create_case(&stored).await?;

    metrics::counter!("verifyflow_kyc_cases_created_total").increment(1);
    for check in &stored.checks {
        metrics::counter!(
            "verifyflow_kyc_checks_total",
            "check_type" => check.check_type.as_str(),
            "status" => check.status.as_str()
        )
        .increment(1);
    }

    tracing::info!(
        case_id = %stored.case.id,
        status = %stored.case.status,
        risk_level = %stored.case.risk_level,
        store = state.store.backend(),
        "kyc case created"
    );

    project_case(Some(&stored.case), &stored.checks)
        .map_err(|e| AppError::Internal(e.to_string()))
}
