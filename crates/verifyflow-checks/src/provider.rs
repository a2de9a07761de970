//! # Check Provider Interface
//!
//! Implementations must be `Send + Sync` so they can be shared across
//! request tasks behind an `Arc`. The trait is object-safe to support
//! runtime provider selection (stub vs. live).

use async_trait::async_trait;
use verifyflow_core::{CheckStatus, CheckType, ValidatedApplicant};

/// Errors from a check provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The screening backend could not be reached or failed internally.
    #[error("{provider} unavailable: {reason}")]
    Unavailable {
        /// Provider name, as returned by [`CheckProvider::provider_name`].
        provider: String,
        /// Human-readable description of the failure.
        reason: String,
    },

    /// A provider returned a status outside its declared outcome set.
    #[error("{check_type} check returned {status}, which it does not declare")]
    UnexpectedOutcome {
        check_type: CheckType,
        status: CheckStatus,
    },
}

/// A single screening capability.
#[async_trait]
pub trait CheckProvider: Send + Sync {
    /// Which check this provider answers.
    fn check_type(&self) -> CheckType;

    /// Every status this provider can return.
    fn outcomes(&self) -> &'static [CheckStatus];

    /// Human-readable name of the implementation (e.g. "StubPepCheck").
    fn provider_name(&self) -> &str;

    /// Screen one applicant.
    async fn run(&self, applicant: &ValidatedApplicant) -> Result<CheckStatus, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ProviderError::Unavailable {
            provider: "LiveSanctions".into(),
            reason: "connection refused".into(),
        };
        assert!(err.to_string().contains("LiveSanctions"));
        assert!(err.to_string().contains("connection refused"));

        let err = ProviderError::UnexpectedOutcome {
            check_type: CheckType::AdverseMedia,
            status: CheckStatus::Flagged,
        };
        assert_eq!(
            err.to_string(),
            "adverseMedia check returned flagged, which it does not declare"
        );
    }
}
