//! # verifyflow-checks: KYC Check Providers
//!
//! Screening for a new applicant runs through four providers, one per
//! [`CheckType`](verifyflow_core::CheckType): identity, sanctions, PEP and
//! adverse media.
//!
//! ## Architecture
//!
//! The [`CheckProvider`] trait abstracts over the screening backend. Every
//! provider declares the fixed set of statuses it can return; the
//! [`CheckSuite`] runs its providers in sequence and rejects any result
//! outside that set. Providers are held as `Arc<dyn CheckProvider>` so a live
//! integration can replace a stub without touching intake or aggregation.
//!
//! The providers shipped here are stand-ins. Identity, sanctions and adverse
//! media always pass; PEP flags a configurable fraction of applicants at
//! random. Each sleeps for a simulated latency unless latency simulation is
//! switched off.

pub mod provider;
pub mod stubs;
pub mod suite;

pub use provider::{CheckProvider, ProviderError};
pub use stubs::{AdverseMediaCheck, IdentityCheck, PepCheck, SanctionsCheck, StubSettings};
pub use suite::CheckSuite;
