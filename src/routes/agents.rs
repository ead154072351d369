//! Agent roster routes.
//!
//! GET /agents            - List active agents (or filter by region)
//! GET /agents/:id        - Retrieve one agent
//! GET /agents/:id/stats  - Per-agent earnings projection
//!
//! All reads; the roster is fixed at startup. These feed the reporting
//! dashboard and the notification glue that needs an agent's name, email,
//! and specialty to address a hand-off message.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};

use crate::models::{Agent, AgentFilter, AgentStats, ApiResponse};
use crate::state::AppState;

/// Build the agents router.
pub fn router() -> Router {
    Router::new()
        .route("/agents", get(list_agents))
        .route("/agents/{id}", get(get_agent))
        .route("/agents/{id}/stats", get(get_agent_stats))
}

/// List active agents; `?region=` switches to a region listing (which
/// includes inactive agents, since it is informational).
async fn list_agents(
    Extension(state): Extension<AppState>,
    Query(filter): Query<AgentFilter>,
) -> Json<ApiResponse<Vec<Agent>>> {
    let agents = match &filter.region {
        Some(region) => state.directory.agents_by_region(region),
        None => state.directory.active_agents(),
    };
    Json(ApiResponse {
        message: format!("{} agents", agents.len()),
        data: agents,
    })
}

/// Retrieve an agent by ID.
async fn get_agent(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Agent>>, StatusCode> {
    let agent = state.directory.agent_by_id(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(ApiResponse {
        data: agent,
        message: "Agent retrieved".to_string(),
    }))
}

/// Lifetime earnings and per-order average for one agent.
async fn get_agent_stats(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AgentStats>>, StatusCode> {
    let stats = state.directory.agent_stats(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(ApiResponse {
        data: stats,
        message: "Agent stats retrieved".to_string(),
    }))
}
