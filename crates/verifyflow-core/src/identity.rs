//! # Case Identifier
//!
//! `CaseId` is a validated newtype over the `KYC-<token>` string form.
//! Generated ids use `<unix-millis>-<6 hex chars>` as the token so that ids
//! sort roughly by creation time and two intakes in the same millisecond do
//! not collide.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

const PREFIX: &str = "KYC-";

/// Unique identifier of a KYC case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(value_type = String, example = "KYC-1735300000000-3FA2C1"))]
#[serde(try_from = "String", into = "String")]
pub struct CaseId(String);

impl CaseId {
    /// Wrap an existing identifier, checking the `KYC-<token>` shape.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        match id.strip_prefix(PREFIX) {
            Some(token) if !token.trim().is_empty() => Ok(Self(id)),
            _ => Err(CoreError::InvalidCaseId(id)),
        }
    }

    /// Generate a fresh identifier for a case created at `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{PREFIX}{}-{}",
            now.timestamp_millis(),
            suffix[..6].to_ascii_uppercase()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CaseId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CaseId> for String {
    fn from(id: CaseId) -> Self {
        id.0
    }
}

impl std::borrow::Borrow<str> for CaseId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for CaseId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
