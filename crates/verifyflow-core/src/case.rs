//! # Case and Check Records
//!
//! Storage-side row shapes and the API-facing [`CaseView`].
//!
//! A [`CaseRecord`] and its [`CheckRecord`]s are written together at intake
//! and never updated. [`StoredCase`] is the unit the Case Store hands back:
//! one case row plus whatever check rows reference it.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CaseStatus, CheckStatus, CheckType, RiskLevel};
use crate::identity::CaseId;

/// Mapping from check type to outcome, in canonical check order.
pub type CheckOutcomes = BTreeMap<CheckType, CheckStatus>;

/// One persisted KYC case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: CaseId,
    /// Display name, `first_name + " " + last_name`.
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    /// As submitted; not parsed.
    pub date_of_birth: String,
    pub country: String,
    pub id_number: String,
    pub status: CaseStatus,
    pub risk_level: RiskLevel,
    /// Calendar date the case was opened (UTC).
    pub date: NaiveDate,
    /// Creation instant, used for reverse-chronological listing.
    pub created_at: DateTime<Utc>,
}

/// One persisted check outcome. Many-to-one with [`CaseRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRecord {
    pub case_id: CaseId,
    pub check_type: CheckType,
    pub status: CheckStatus,
}

/// A case row together with its check rows, as read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCase {
    pub case: CaseRecord,
    pub checks: Vec<CheckRecord>,
}

impl StoredCase {
    /// Build check rows for `case` from an outcome mapping.
    pub fn from_outcomes(case: CaseRecord, outcomes: &CheckOutcomes) -> Self {
        let checks = outcomes
            .iter()
            .map(|(check_type, status)| CheckRecord {
                case_id: case.id.clone(),
                check_type: *check_type,
                status: *status,
            })
            .collect();
        Self { case, checks }
    }
}

/// API-facing projection of a case and its checks.
///
/// `checks` serializes as an object keyed by check type
/// (`identity`, `sanctions`, `pep`, `adverseMedia`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CaseView {
    pub id: CaseId,
    pub name: String,
    pub status: CaseStatus,
    pub risk_level: RiskLevel,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date))]
    pub date: NaiveDate,
    pub country: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub checks: CheckOutcomes,
}
