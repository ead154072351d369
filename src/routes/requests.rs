//! Service request routes.
//!
//! POST  /requests             - Submit a paid order and route it to an agent
//! GET   /requests             - List requests, filterable by status/agent
//! GET   /requests/:id         - Retrieve a request by ID
//! PATCH /requests/:id/status  - Advance a request through its lifecycle

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Extension, Json, Router};
use tracing::{error, info};

use crate::ledger;
use crate::models::{
    ApiResponse, CreateRequestBody, RequestFilter, SopRequest, UpdateStatusBody,
};
use crate::state::AppState;

/// Build the requests router.
pub fn router() -> Router {
    Router::new()
        .route("/requests", post(create_request).get(list_requests))
        .route("/requests/{id}", get(get_request))
        .route("/requests/{id}/status", patch(update_status))
}

/// Submit a new order. Called by the order flow after payment capture.
///
/// Creation and insertion are separate steps: the record returned by the
/// core can be enriched before it is saved, and only a fully-routed request
/// is ever persisted. A routing miss therefore persists nothing.
async fn create_request(
    Extension(state): Extension<AppState>,
    Json(body): Json<CreateRequestBody>,
) -> Result<(StatusCode, Json<ApiResponse<SopRequest>>), StatusCode> {
    let request = ledger::create_request(&state.directory, &body).map_err(|e| {
        error!("Request creation failed: {}", e);
        e.status_code()
    })?;

    state.ledger.save(request.clone());
    info!("Request {} saved for {}", request.id, request.client_email);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: request,
            message: "Request created and assigned".to_string(),
        }),
    ))
}

/// List requests, optionally filtered by status and/or agent.
async fn list_requests(
    Extension(state): Extension<AppState>,
    Query(filter): Query<RequestFilter>,
) -> Json<ApiResponse<Vec<SopRequest>>> {
    let mut requests = match filter.status {
        Some(status) => state.ledger.by_status(status),
        None => match &filter.agent_id {
            Some(agent_id) => state.ledger.by_agent(agent_id),
            None => state.ledger.all(),
        },
    };
    if filter.status.is_some() {
        if let Some(agent_id) = &filter.agent_id {
            requests.retain(|r| &r.agent_id == agent_id);
        }
    }

    Json(ApiResponse {
        message: format!("{} requests", requests.len()),
        data: requests,
    })
}

/// Retrieve a request by ID.
async fn get_request(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SopRequest>>, StatusCode> {
    let request = state.ledger.find_by_id(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(ApiResponse {
        data: request,
        message: "Request retrieved".to_string(),
    }))
}

/// Set a request's status. Called by the admin flow, and by the document
/// flow with `sop_content` once a draft is ready for the agent.
async fn update_status(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Json<ApiResponse<SopRequest>>, StatusCode> {
    if !state.ledger.update_status(&id, body.status, body.sop_content) {
        error!("Status update for unknown request {}", id);
        return Err(StatusCode::NOT_FOUND);
    }
    let request = state.ledger.find_by_id(&id).ok_or(StatusCode::NOT_FOUND)?;
    info!("Request {} moved to {:?}", id, body.status);

    Ok(Json(ApiResponse {
        data: request,
        message: "Status updated".to_string(),
    }))
}
