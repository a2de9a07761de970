//! # Dashboard Statistics Route

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use verifyflow_core::{compute_stats_as_of, StatsSnapshot};

use super::{method_not_allowed, options_ok};
use crate::error::AppError;
use crate::state::AppState;

/// The current statistics snapshot.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: StatsSnapshot,
}

/// Build the stats router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/stats",
        get(get_stats)
            .options(options_ok)
            .fallback(method_not_allowed),
    )
}

/// GET /stats - Totals, approval rate, risk distribution and the last seven
/// days of intake volume.
#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Statistics snapshot", body = StatsResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    tag = "stats"
)]
async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let records = state.store.list_case_records().await?;
    let stats = compute_stats_as_of(&records, Utc::now().date_naive());
    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}
