//! # verifyflow-core: Foundational Types for VerifyFlow
//!
//! Defines the KYC case model shared by every other crate in the workspace,
//! plus the pure transformations that sit between storage and the API:
//!
//! - **Domain enums**: case status, risk level, check type, check status.
//!   One definition each, exhaustive `match` everywhere.
//! - **Records and views**: the stored row shapes ([`CaseRecord`],
//!   [`CheckRecord`]) and the API-facing [`CaseView`].
//! - **Aggregation**: [`project_case`] / [`project_cases`] fold check rows
//!   into a check-type → status mapping.
//! - **Statistics**: [`compute_stats`] derives the dashboard snapshot from a
//!   case collection.
//! - **Intake**: applicant validation, the [`DecisionPolicy`] extension
//!   point, and [`build_case`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `verifyflow-*` crates (leaf of the DAG).
//! - No I/O. Everything here is deterministic given its inputs, except case
//!   id generation which draws a random suffix.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod aggregation;
pub mod case;
pub mod domain;
pub mod error;
pub mod identity;
pub mod intake;
pub mod stats;

pub use aggregation::{project_case, project_cases};
pub use case::{CaseRecord, CaseView, CheckOutcomes, CheckRecord, StoredCase};
pub use domain::{CaseStatus, CheckStatus, CheckType, RiskLevel};
pub use error::{CoreError, ValidationError};
pub use identity::CaseId;
pub use intake::{
    build_case, validate, ApplicantSubmission, Decision, DecisionPolicy, FixedDecision,
    ValidatedApplicant, REQUIRED_FIELDS,
};
pub use stats::{compute_stats, compute_stats_as_of, RiskBucket, RiskDistribution, StatsSnapshot};
