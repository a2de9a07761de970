//! # verifyflow-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the VerifyFlow KYC API.
//! Binds to a configurable port (default 8080).

use std::sync::Arc;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use verifyflow_api::db::cases::PgCaseStore;
use verifyflow_api::state::{json_logs_requested, AppConfig, AppState};
use verifyflow_api::store::{CaseStore, MemoryCaseStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging first, so configuration warnings are visible.
    init_tracing();

    let config = AppConfig::from_env();
    tracing::info!(?config, "configuration loaded");

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install Prometheus recorder")?;

    // Database is optional; absent means in-memory only.
    let store: Arc<dyn CaseStore> = match verifyflow_api::db::init_pool(&config)
        .await
        .context("database initialization failed")?
    {
        Some(pool) => Arc::new(PgCaseStore::new(pool)),
        None => Arc::new(MemoryCaseStore::new()),
    };

    if config.seed_demo_cases {
        verifyflow_api::seed::seed_demo_cases(store.as_ref())
            .await
            .context("failed to seed demo cases")?;
    }

    let port = config.port;
    let state = AppState::with_store(config, store).with_metrics(metrics);
    let app = verifyflow_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("VerifyFlow API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// `RUST_LOG` filter (default `info`); `LOG_FORMAT=json` for JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if json_logs_requested(&|key: &str| std::env::var(key).ok()) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
