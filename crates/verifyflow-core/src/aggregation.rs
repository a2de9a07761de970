//! # Aggregation Engine
//!
//! Pure projection from the stored row shape to the API view shape.
//!
//! Check rows are folded into a [`CheckOutcomes`] map in iteration order, so
//! when two rows carry the same check type the later row wins. The store does
//! not enforce uniqueness of (case, check type); this fold is where the
//! ambiguity is resolved.

use crate::case::{CaseRecord, CaseView, CheckOutcomes, CheckRecord, StoredCase};
use crate::error::CoreError;

/// Project one case row and its check rows into a [`CaseView`].
///
/// Returns [`CoreError::CaseNotFound`] when `case` is `None`. A case with no
/// check rows projects to an empty `checks` map rather than an error.
pub fn project_case(
    case: Option<&CaseRecord>,
    checks: &[CheckRecord],
) -> Result<CaseView, CoreError> {
    let case = case.ok_or(CoreError::CaseNotFound)?;

    let checks = checks.iter().fold(CheckOutcomes::new(), |mut acc, check| {
        acc.insert(check.check_type, check.status);
        acc
    });

    Ok(CaseView {
        id: case.id.clone(),
        name: case.name.clone(),
        status: case.status,
        risk_level: case.risk_level,
        date: case.date,
        country: case.country.clone(),
        checks,
    })
}

/// Project a list of stored cases, preserving the store's ordering.
pub fn project_cases(cases: &[StoredCase]) -> Vec<CaseView> {
    cases
        .iter()
        .filter_map(|stored| project_case(Some(&stored.case), &stored.checks).ok())
        .collect()
}
