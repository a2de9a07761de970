//! # Database Persistence Layer
//!
//! PostgreSQL persistence for KYC cases via SQLx.
//!
//! ## Architecture
//!
//! The database layer is **optional**. When `DATABASE_URL` is set, cases and
//! checks are stored in the `kyc_cases` and `kyc_checks` tables through
//! [`cases::PgCaseStore`]. When absent, the API runs on the in-memory store
//! and nothing survives a restart.

pub mod cases;

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::state::AppConfig;

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if no database URL is configured (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool(config: &AppConfig) -> Result<Option<PgPool>, sqlx::Error> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!(
            "DATABASE_URL not set, running with the in-memory case store. \
             Cases will not survive restarts."
        );
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections.max(1))
        .acquire_timeout(Duration::from_secs(5))
        .connect(url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}
