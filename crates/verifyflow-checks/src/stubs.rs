//! # Stub Providers
//!
//! Placeholder screening used until live integrations exist. Identity,
//! sanctions and adverse media always pass. PEP returns `flagged` with
//! probability [`StubSettings::pep_flag_probability`] (0.2 by default) and
//! `passed` otherwise.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use verifyflow_core::{CheckStatus, CheckType, ValidatedApplicant};

use crate::provider::{CheckProvider, ProviderError};

const IDENTITY_LATENCY: Duration = Duration::from_millis(300);
const SANCTIONS_LATENCY: Duration = Duration::from_millis(400);
const PEP_LATENCY: Duration = Duration::from_millis(350);
const ADVERSE_MEDIA_LATENCY: Duration = Duration::from_millis(450);

/// Default share of applicants the PEP stub flags.
pub const DEFAULT_PEP_FLAG_PROBABILITY: f64 = 0.2;

const ALWAYS_PASSED: &[CheckStatus] = &[CheckStatus::Passed];
const PASSED_OR_FLAGGED: &[CheckStatus] = &[CheckStatus::Passed, CheckStatus::Flagged];

/// Knobs shared by the stub providers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StubSettings {
    /// Sleep for each provider's simulated latency before answering.
    pub simulate_latency: bool,
    /// Probability in `[0, 1]` that the PEP stub flags an applicant.
    pub pep_flag_probability: f64,
}

impl Default for StubSettings {
    fn default() -> Self {
        Self {
            simulate_latency: true,
            pep_flag_probability: DEFAULT_PEP_FLAG_PROBABILITY,
        }
    }
}

impl StubSettings {
    /// No latency, PEP never flags. Deterministic; used by tests.
    pub fn instant() -> Self {
        Self {
            simulate_latency: false,
            pep_flag_probability: 0.0,
        }
    }

    fn latency(&self, nominal: Duration) -> Duration {
        if self.simulate_latency {
            nominal
        } else {
            Duration::ZERO
        }
    }
}

async fn simulate(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

/// Identity verification stub. Always passes.
#[derive(Debug, Clone)]
pub struct IdentityCheck {
    latency: Duration,
}

impl IdentityCheck {
    pub fn new(settings: &StubSettings) -> Self {
        Self {
            latency: settings.latency(IDENTITY_LATENCY),
        }
    }
}

#[async_trait]
impl CheckProvider for IdentityCheck {
    fn check_type(&self) -> CheckType {
        CheckType::Identity
    }

    fn outcomes(&self) -> &'static [CheckStatus] {
        ALWAYS_PASSED
    }

    fn provider_name(&self) -> &str {
        "StubIdentityCheck"
    }

    async fn run(&self, _applicant: &ValidatedApplicant) -> Result<CheckStatus, ProviderError> {
        simulate(self.latency).await;
        Ok(CheckStatus::Passed)
    }
}

/// Sanctions screening stub. Always passes.
#[derive(Debug, Clone)]
pub struct SanctionsCheck {
    latency: Duration,
}

impl SanctionsCheck {
    pub fn new(settings: &StubSettings) -> Self {
        Self {
            latency: settings.latency(SANCTIONS_LATENCY),
        }
    }
}

#[async_trait]
impl CheckProvider for SanctionsCheck {
    fn check_type(&self) -> CheckType {
        CheckType::Sanctions
    }

    fn outcomes(&self) -> &'static [CheckStatus] {
        ALWAYS_PASSED
    }

    fn provider_name(&self) -> &str {
        "StubSanctionsCheck"
    }

    async fn run(&self, _applicant: &ValidatedApplicant) -> Result<CheckStatus, ProviderError> {
        simulate(self.latency).await;
        Ok(CheckStatus::Passed)
    }
}

/// PEP screening stub. Flags at random.
#[derive(Debug, Clone)]
pub struct PepCheck {
    latency: Duration,
    flag_probability: f64,
}

impl PepCheck {
    /// The flag probability is clamped into `[0, 1]`; NaN counts as zero.
    pub fn new(settings: &StubSettings) -> Self {
        let p = settings.pep_flag_probability;
        Self {
            latency: settings.latency(PEP_LATENCY),
            flag_probability: if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) },
        }
    }

    pub fn flag_probability(&self) -> f64 {
        self.flag_probability
    }
}

#[async_trait]
impl CheckProvider for PepCheck {
    fn check_type(&self) -> CheckType {
        CheckType::Pep
    }

    fn outcomes(&self) -> &'static [CheckStatus] {
        PASSED_OR_FLAGGED
    }

    fn provider_name(&self) -> &str {
        "StubPepCheck"
    }

    async fn run(&self, _applicant: &ValidatedApplicant) -> Result<CheckStatus, ProviderError> {
        simulate(self.latency).await;
        let flagged = rand::thread_rng().gen_bool(self.flag_probability);
        Ok(if flagged {
            CheckStatus::Flagged
        } else {
            CheckStatus::Passed
        })
    }
}

/// Adverse media monitoring stub. Always passes.
#[derive(Debug, Clone)]
pub struct AdverseMediaCheck {
    latency: Duration,
}

impl AdverseMediaCheck {
    pub fn new(settings: &StubSettings) -> Self {
        Self {
            latency: settings.latency(ADVERSE_MEDIA_LATENCY),
        }
    }
}

#[async_trait]
impl CheckProvider for AdverseMediaCheck {
    fn check_type(&self) -> CheckType {
        CheckType::AdverseMedia
    }

    fn outcomes(&self) -> &'static [CheckStatus] {
        ALWAYS_PASSED
    }

    fn provider_name(&self) -> &str {
        "StubAdverseMediaCheck"
    }

    async fn run(&self, _applicant: &ValidatedApplicant) -> Result<CheckStatus, ProviderError> {
        simulate(self.latency).await;
        Ok(CheckStatus::Passed)
    }
}
