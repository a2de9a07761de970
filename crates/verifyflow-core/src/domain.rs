//! # KYC Domain Enums
//!
//! The four closed vocabularies of the case model. String forms match the
//! serde serialization and the values persisted in the `kyc_cases` and
//! `kyc_checks` tables, so `as_str()` / `FromStr` are the only place the
//! mapping lives.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// Lifecycle status of a KYC case.
///
/// Set once at intake; there is no transition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    /// Applicant cleared.
    Approved,
    /// Held for manual review.
    Review,
    /// Applicant declined.
    Rejected,
    /// Not yet decided.
    Pending,
}

impl CaseStatus {
    /// All statuses in canonical order.
    pub fn all() -> &'static [CaseStatus] {
        &[Self::Approved, Self::Review, Self::Rejected, Self::Pending]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Review => "review",
            Self::Rejected => "rejected",
            Self::Pending => "pending",
        }
    }

    /// Whether the dashboard counts this status in its `pending` bucket.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Review)
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "review" => Ok(Self::Review),
            "rejected" => Ok(Self::Rejected),
            "pending" => Ok(Self::Pending),
            other => Err(CoreError::UnknownValue {
                kind: "case status",
                value: other.to_string(),
            }),
        }
    }
}

/// Coarse risk classification attached to a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// All risk levels, lowest first.
    pub fn all() -> &'static [RiskLevel] {
        &[Self::Low, Self::Medium, Self::High]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Capitalized label used by the dashboard risk breakdown.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(CoreError::UnknownValue {
                kind: "risk level",
                value: other.to_string(),
            }),
        }
    }
}

/// The screening categories run for every applicant.
///
/// Variant order is the canonical order of the `checks` object in a
/// [`crate::CaseView`] (it is used as a `BTreeMap` key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub enum CheckType {
    /// Document / identity verification.
    Identity,
    /// Sanctions list screening.
    Sanctions,
    /// Politically Exposed Person screening.
    Pep,
    /// Adverse media monitoring.
    AdverseMedia,
}

impl CheckType {
    /// All check types in canonical order.
    pub fn all() -> &'static [CheckType] {
        &[
            Self::Identity,
            Self::Sanctions,
            Self::Pep,
            Self::AdverseMedia,
        ]
    }

    /// Wire / storage identifier. Matches the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Sanctions => "sanctions",
            Self::Pep => "pep",
            Self::AdverseMedia => "adverseMedia",
        }
    }
}

impl std::fmt::Display for CheckType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "identity" => Ok(Self::Identity),
            "sanctions" => Ok(Self::Sanctions),
            "pep" => Ok(Self::Pep),
            "adverseMedia" => Ok(Self::AdverseMedia),
            other => Err(CoreError::UnknownValue {
                kind: "check type",
                value: other.to_string(),
            }),
        }
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// No hit.
    Passed,
    /// Potential hit requiring attention.
    Flagged,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Flagged => "flagged",
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passed" => Ok(Self::Passed),
            "flagged" => Ok(Self::Flagged),
            other => Err(CoreError::UnknownValue {
                kind: "check status",
                value: other.to_string(),
            }),
        }
    }
}
