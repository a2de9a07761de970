//! # Applicant Intake
//!
//! Validation of a submitted applicant and construction of the case record
//! that will be persisted for it.
//!
//! Case status and risk level are produced by a [`DecisionPolicy`]. The only
//! policy shipped is [`FixedDecision`], which approves every applicant at low
//! risk whatever the check outcomes are. Deriving status from outcomes (for
//! example holding a PEP hit for review) is a business rule that has not been
//! defined yet; it belongs in a new `DecisionPolicy` implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::case::{CaseRecord, CheckOutcomes, StoredCase};
use crate::domain::{CaseStatus, RiskLevel};
use crate::error::ValidationError;
use crate::identity::CaseId;

/// Wire names of the required applicant fields, in reporting order.
pub const REQUIRED_FIELDS: [&str; 5] = ["firstName", "lastName", "dateOfBirth", "country", "idNumber"];

/// Raw applicant payload as submitted by the intake form.
///
/// Every field is optional at this layer so that [`validate`] can report
/// all missing fields at once instead of failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSubmission {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub id_number: Option<String>,
}

/// An applicant whose required fields are all present and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedApplicant {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub country: String,
    pub id_number: String,
}

impl ValidatedApplicant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Check that every required field is present and non-blank.
///
/// Values are trimmed. On failure the error names every missing field in
/// [`REQUIRED_FIELDS`] order.
pub fn validate(payload: &ApplicantSubmission) -> Result<ValidatedApplicant, ValidationError> {
    let mut missing = Vec::new();
    let mut require = |name: &'static str, value: &Option<String>| -> String {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => {
                missing.push(name);
                String::new()
            }
        }
    };

    let applicant = ValidatedApplicant {
        first_name: require("firstName", &payload.first_name),
        last_name: require("lastName", &payload.last_name),
        date_of_birth: require("dateOfBirth", &payload.date_of_birth),
        country: require("country", &payload.country),
        id_number: require("idNumber", &payload.id_number),
    };

    if missing.is_empty() {
        Ok(applicant)
    } else {
        Err(ValidationError {
            missing_fields: missing,
        })
    }
}

/// Status and risk assigned to a new case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub status: CaseStatus,
    pub risk_level: RiskLevel,
}

/// Derives a case's status and risk level from its check outcomes.
pub trait DecisionPolicy: Send + Sync {
    fn decide(&self, outcomes: &CheckOutcomes) -> Decision;
}

/// Approves every case at low risk, ignoring outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDecision;

impl DecisionPolicy for FixedDecision {
    fn decide(&self, _outcomes: &CheckOutcomes) -> Decision {
        Decision {
            status: CaseStatus::Approved,
            risk_level: RiskLevel::Low,
        }
    }
}

/// Build the case and check rows for a validated applicant.
///
/// Assigns a fresh `KYC-<token>` id; the case date is the UTC date of `now`.
pub fn build_case(
    applicant: &ValidatedApplicant,
    outcomes: &CheckOutcomes,
    policy: &dyn DecisionPolicy,
    now: DateTime<Utc>,
) -> StoredCase {
    let decision = policy.decide(outcomes);
    let case = CaseRecord {
        id: CaseId::generate(now),
        name: applicant.full_name(),
        first_name: applicant.first_name.clone(),
        last_name: applicant.last_name.clone(),
        date_of_birth: applicant.date_of_birth.clone(),
        country: applicant.country.clone(),
        id_number: applicant.id_number.clone(),
        status: decision.status,
        risk_level: decision.risk_level,
        date: now.date_naive(),
        created_at: now,
    };
    StoredCase::from_outcomes(case, outcomes)
}
