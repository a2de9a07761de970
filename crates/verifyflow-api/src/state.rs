//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! - **Case store**: `Arc<dyn CaseStore>`, in-memory or PostgreSQL.
//! - **Check suite**: the providers run for every intake.
//! - **Decision policy**: derives status and risk for a new case.
//! - **Metrics handle**: renders `/metrics` when a Prometheus recorder is
//!   installed (the binary does this; tests do not).

use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;
use verifyflow_checks::{CheckSuite, StubSettings};
use verifyflow_core::{DecisionPolicy, FixedDecision};

use crate::store::{CaseStore, MemoryCaseStore};

/// Delay before checks start, mimicking upstream document processing.
pub const PROCESSING_DELAY: Duration = Duration::from_millis(1500);

/// Application configuration, read from the environment.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// PostgreSQL URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Pool size when a database is configured.
    pub database_max_connections: u32,
    /// Sleep for the processing delay and per-check latencies.
    pub simulate_latency: bool,
    /// Probability that the stub PEP check flags an applicant.
    pub pep_flag_probability: f64,
    /// Insert the three demo cases at startup.
    pub seed_demo_cases: bool,
    /// Emit JSON log lines instead of human-readable text.
    pub json_logs: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("database_max_connections", &self.database_max_connections)
            .field("simulate_latency", &self.simulate_latency)
            .field("pep_flag_probability", &self.pep_flag_probability)
            .field("seed_demo_cases", &self.seed_demo_cases)
            .field("json_logs", &self.json_logs)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Build configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = StubSettings::default();
        Self {
            port: parse_or(&lookup, "PORT", 8080),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10),
            simulate_latency: flag_or(&lookup, "SIMULATE_LATENCY", defaults.simulate_latency),
            pep_flag_probability: parse_or(
                &lookup,
                "PEP_FLAG_PROBABILITY",
                defaults.pep_flag_probability,
            ),
            seed_demo_cases: flag_or(&lookup, "SEED_DEMO_CASES", false),
            json_logs: json_logs_requested(&lookup),
        }
    }

    /// Settings for the stub check providers.
    pub fn stub_settings(&self) -> StubSettings {
        StubSettings {
            simulate_latency: self.simulate_latency,
            pep_flag_probability: self.pep_flag_probability,
        }
    }

    /// Pause before running checks for an intake.
    pub fn processing_delay(&self) -> Duration {
        if self.simulate_latency {
            PROCESSING_DELAY
        } else {
            Duration::ZERO
        }
    }
}

/// Whether `LOG_FORMAT` asks for JSON log lines.
///
/// Separate from [`AppConfig::from_lookup`] so the binary can set up logging
/// before the rest of the configuration is parsed.
pub fn json_logs_requested(lookup: &impl Fn(&str) -> Option<String>) -> bool {
    lookup("LOG_FORMAT")
        .map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, "unparseable configuration value, using default");
            default
        }
    }
}

fn flag_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(key, value = %raw, "unparseable configuration flag, using default");
            default
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn CaseStore>,
    pub checks: CheckSuite,
    pub policy: Arc<dyn DecisionPolicy>,
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("store", &self.store.backend())
            .field("checks", &self.checks)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    /// In-memory store, instant deterministic checks, no metrics recorder.
    pub fn new() -> Self {
        Self::with_config(AppConfig {
            simulate_latency: false,
            pep_flag_probability: 0.0,
            ..AppConfig::default()
        })
    }

    /// In-memory store with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryCaseStore::new()))
    }

    /// Stub check providers and the fixed decision policy over `store`.
    pub fn with_store(config: AppConfig, store: Arc<dyn CaseStore>) -> Self {
        Self {
            checks: CheckSuite::stub(config.stub_settings()),
            config: Arc::new(config),
            store,
            policy: Arc::new(FixedDecision),
            metrics: None,
        }
    }

    pub fn with_checks(mut self, checks: CheckSuite) -> Self {
        self.checks = checks;
        self
    }

    pub fn with_policy(mut self, policy: Arc<dyn DecisionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert!(config.database_url.is_none());
        assert_eq!(config.database_max_connections, 10);
        assert!(config.simulate_latency);
        assert_eq!(config.pep_flag_probability, 0.2);
        assert!(!config.seed_demo_cases);
        assert!(!config.json_logs);
        assert_eq!(config.processing_delay(), PROCESSING_DELAY);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "3001"),
            ("DATABASE_URL", "postgres://u:p@localhost/kyc"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("SIMULATE_LATENCY", "false"),
            ("PEP_FLAG_PROBABILITY", "0.5"),
            ("SEED_DEMO_CASES", "1"),
            ("LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(config.port, 3001);
        assert_eq!(config.database_url.as_deref(), Some("postgres://u:p@localhost/kyc"));
        assert_eq!(config.database_max_connections, 4);
        assert!(!config.simulate_latency);
        assert_eq!(config.processing_delay(), Duration::ZERO);
        assert_eq!(config.stub_settings().pep_flag_probability, 0.5);
        assert!(config.seed_demo_cases);
        assert!(config.json_logs);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = config_from(&[
            ("PORT", "eighty"),
            ("SIMULATE_LATENCY", "maybe"),
            ("DATABASE_URL", "  "),
        ]);
        assert_eq!(config.port, 8080);
        assert!(config.simulate_latency);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn debug_redacts_database_url() {
        let config = config_from(&[("DATABASE_URL", "postgres://admin:hunter2@db/kyc")]);
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn new_state_is_in_memory_and_instant() {
        let state = AppState::new();
        assert_eq!(state.store.backend(), "memory");
        assert!(!state.config.simulate_latency);
        assert!(state.metrics.is_none());
        assert_eq!(state.checks.check_types().len(), 4);
    }
}
