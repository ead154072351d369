//! Commission payout routes.
//!
//! GET  /payouts/pending  - Unpaid commission grouped by agent
//! POST /payouts/process  - Credit agents and mark contributing requests paid

use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use tracing::info;

use crate::ledger;
use crate::models::{ApiResponse, PendingPayout, ProcessedPayout};
use crate::state::AppState;

/// Build the payouts router.
pub fn router() -> Router {
    Router::new()
        .route("/payouts/pending", get(pending_payouts))
        .route("/payouts/process", post(process_payouts))
}

/// Report unpaid commission per agent. Read-only; repeated calls return the
/// same groups until a payout run or a status change drains them.
async fn pending_payouts(
    Extension(state): Extension<AppState>,
) -> Json<ApiResponse<Vec<PendingPayout>>> {
    let payouts = ledger::pending_payouts(state.ledger.as_ref(), &state.directory);
    Json(ApiResponse {
        message: format!("{} agents with pending commission", payouts.len()),
        data: payouts,
    })
}

/// Run a payout: one credit per agent with pending commission, and every
/// contributing request moves to `paid` so the run is not repeatable. The
/// drain step is atomic, so overlapping runs split the pool between them
/// instead of each crediting it in full.
async fn process_payouts(
    Extension(state): Extension<AppState>,
) -> Json<ApiResponse<Vec<ProcessedPayout>>> {
    let processed = ledger::process_payouts(state.ledger.as_ref(), &state.directory);
    info!("Payout run credited {} agents", processed.len());

    Json(ApiResponse {
        message: format!("{} agents paid", processed.len()),
        data: processed,
    })
}
