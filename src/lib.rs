//! # Study Abroad Service Desk Library
//!
//! Exposes the Axum router and core modules so integration tests can create
//! an in-process server without requiring `cargo run` in another terminal.

pub mod directory;
pub mod error;
pub mod ledger;
pub mod models;
pub mod roster;
pub mod routes;
pub mod state;

use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all route modules and middleware.
///
/// The caller provides the application state, so tests can seed their own
/// roster and ledger. This function does NOT start a server.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::requests::router())
        .merge(routes::agents::router())
        .merge(routes::payouts::router())
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
