//! Operator maintenance endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::Operator;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for POST /admin/sweep.
#[derive(Debug, Serialize)]
pub struct SweepResponse {
    pub swept: u64,
}

/// POST /api/v1/admin/sweep
///
/// Manual trigger for the expiry sweep; runs the same pass as the worker
/// binary and returns the number of items retired.
pub async fn run_sweep(
    _op: Operator,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let swept = showyo_worker::sweep_once(&state.pool, Utc::now()).await?;
    tracing::info!(swept, "Manual expiry sweep finished");
    Ok(Json(DataResponse {
        data: SweepResponse { swept },
    }))
}
