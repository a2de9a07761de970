//! # Check Suite
//!
//! Runs a fixed list of providers against one applicant, one after another,
//! and collects their answers into a [`CheckOutcomes`] map.

use std::sync::Arc;

use verifyflow_core::{CheckOutcomes, CheckType, ValidatedApplicant};

use crate::provider::{CheckProvider, ProviderError};
use crate::stubs::{AdverseMediaCheck, IdentityCheck, PepCheck, SanctionsCheck, StubSettings};

/// An ordered set of check providers.
#[derive(Clone)]
pub struct CheckSuite {
    providers: Vec<Arc<dyn CheckProvider>>,
}

impl std::fmt::Debug for CheckSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|p| p.provider_name()))
            .finish()
    }
}

impl CheckSuite {
    pub fn new(providers: Vec<Arc<dyn CheckProvider>>) -> Self {
        Self { providers }
    }

    /// The four stub providers in canonical check order.
    pub fn stub(settings: StubSettings) -> Self {
        Self::new(vec![
            Arc::new(IdentityCheck::new(&settings)),
            Arc::new(SanctionsCheck::new(&settings)),
            Arc::new(PepCheck::new(&settings)),
            Arc::new(AdverseMediaCheck::new(&settings)),
        ])
    }

    /// Check types covered, in run order.
    pub fn check_types(&self) -> Vec<CheckType> {
        self.providers.iter().map(|p| p.check_type()).collect()
    }

    /// Run every provider in sequence.
    ///
    /// The first provider error aborts the run. A status outside the
    /// provider's declared outcome set is reported as
    /// [`ProviderError::UnexpectedOutcome`]. If two providers answer the
    /// same check type, the later answer is kept.
    pub async fn run_checks(
        &self,
        applicant: &ValidatedApplicant,
    ) -> Result<CheckOutcomes, ProviderError> {
        let mut outcomes = CheckOutcomes::new();
        for provider in &self.providers {
            let check_type = provider.check_type();
            let status = provider.run(applicant).await?;
            if !provider.outcomes().contains(&status) {
                return Err(ProviderError::UnexpectedOutcome { check_type, status });
            }
            tracing::debug!(
                provider = provider.provider_name(),
                check_type = %check_type,
                status = %status,
                "check completed"
            );
            outcomes.insert(check_type, status);
        }
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use verifyflow_core::CheckStatus;

    fn applicant() -> ValidatedApplicant {
        ValidatedApplicant {
            first_name: "John".into(),
            last_name: "Doe".into(),
            date_of_birth: "1990-01-01".into(),
            country: "United States".into(),
            id_number: "P1".into(),
        }
    }

    /// Provider that misreports: declares `passed` only but returns `flagged`.
    struct Misbehaving;

    #[async_trait]
    impl CheckProvider for Misbehaving {
        fn check_type(&self) -> CheckType {
            CheckType::Sanctions
        }
        fn outcomes(&self) -> &'static [CheckStatus] {
            &[CheckStatus::Passed]
        }
        fn provider_name(&self) -> &str {
            "Misbehaving"
        }
        async fn run(&self, _: &ValidatedApplicant) -> Result<CheckStatus, ProviderError> {
            Ok(CheckStatus::Flagged)
        }
    }

    struct Offline;

    #[async_trait]
    impl CheckProvider for Offline {
        fn check_type(&self) -> CheckType {
            CheckType::Identity
        }
        fn outcomes(&self) -> &'static [CheckStatus] {
            &[CheckStatus::Passed]
        }
        fn provider_name(&self) -> &str {
            "Offline"
        }
        async fn run(&self, _: &ValidatedApplicant) -> Result<CheckStatus, ProviderError> {
            Err(ProviderError::Unavailable {
                provider: "Offline".into(),
                reason: "no route to host".into(),
            })
        }
    }

    #[tokio::test]
    async fn stub_suite_returns_exactly_four_types() {
        let suite = CheckSuite::stub(StubSettings::instant());
        let outcomes = suite.run_checks(&applicant()).await.unwrap();
        let types: Vec<_> = outcomes.keys().copied().collect();
        assert_eq!(types, CheckType::all());
        assert!(outcomes.values().all(|s| *s == CheckStatus::Passed));
    }

    #[tokio::test]
    async fn stub_suite_outcomes_within_declared_sets() {
        let suite = CheckSuite::stub(StubSettings {
            simulate_latency: false,
            pep_flag_probability: 0.5,
        });
        for _ in 0..30 {
            let outcomes = suite.run_checks(&applicant()).await.unwrap();
            assert_eq!(outcomes.len(), 4);
            assert_eq!(outcomes[&CheckType::Identity], CheckStatus::Passed);
            assert_eq!(outcomes[&CheckType::Sanctions], CheckStatus::Passed);
            assert_eq!(outcomes[&CheckType::AdverseMedia], CheckStatus::Passed);
            assert!(matches!(
                outcomes[&CheckType::Pep],
                CheckStatus::Passed | CheckStatus::Flagged
            ));
        }
    }

    #[tokio::test]
    async fn undeclared_outcome_is_rejected() {
        let suite = CheckSuite::new(vec![Arc::new(Misbehaving)]);
        let err = suite.run_checks(&applicant()).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::UnexpectedOutcome {
                check_type: CheckType::Sanctions,
                status: CheckStatus::Flagged
            }
        ));
    }

    #[tokio::test]
    async fn provider_error_aborts_run() {
        let settings = StubSettings::instant();
        let suite = CheckSuite::new(vec![
            Arc::new(Offline),
            Arc::new(SanctionsCheck::new(&settings)),
        ]);
        let err = suite.run_checks(&applicant()).await.unwrap_err();
        assert!(err.to_string().contains("no route to host"));
    }

    #[test]
    fn debug_lists_provider_names() {
        let suite = CheckSuite::stub(StubSettings::instant());
        let debug = format!("{suite:?}");
        assert!(debug.contains("StubIdentityCheck"));
        assert!(debug.contains("StubAdverseMediaCheck"));
        assert_eq!(suite.check_types().len(), 4);
    }
}
