//! # Error Types
//!
//! Errors raised by the core crate. All use `thiserror`.

use thiserror::Error;

/// Top-level error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A projection was requested for a case row that does not exist.
    #[error("case not found")]
    CaseNotFound,

    /// A string did not name a known value of a domain enum.
    #[error("unknown {kind}: {value:?}")]
    UnknownValue {
        /// Which enum was being parsed ("case status", "check type", ...).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A case identifier did not have the `KYC-<token>` shape.
    #[error("invalid case id {0:?}: expected KYC-<token>")]
    InvalidCaseId(String),
}

/// Applicant submission failed validation.
///
/// Lists every missing required field, not just the first one found, in the
/// order of [`crate::intake::REQUIRED_FIELDS`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing required fields: {}", .missing_fields.join(", "))]
pub struct ValidationError {
    /// Wire names (camelCase) of the absent or blank fields.
    pub missing_fields: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_all_fields() {
        let err = ValidationError {
            missing_fields: vec!["firstName", "country"],
        };
        assert_eq!(err.to_string(), "missing required fields: firstName, country");
    }

    #[test]
    fn unknown_value_display() {
        let err = CoreError::UnknownValue {
            kind: "risk level",
            value: "extreme".into(),
        };
        assert!(err.to_string().contains("risk level"));
        assert!(err.to_string().contains("extreme"));
    }
}
