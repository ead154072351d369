//! # Study Abroad Service Desk
//!
//! A standalone Axum web application that routes paid SOP/visa orders to a
//! fixed roster of human agents and keeps the commission ledger for them.
//!
//! ## Architecture
//!
//! - Axum handles HTTP routing and the request/response lifecycle
//! - The agent roster is seeded once at startup; routing never mutates it
//! - The request ledger is in-memory and resets on restart
//! - Payout runs are the only writers to agent earnings counters

mod directory;
mod error;
mod ledger;
mod models;
mod roster;
mod routes;
mod state;

use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "abroad_assist=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting study-abroad service desk");

    // Seed the roster and an empty ledger
    let state = AppState::seeded();
    info!(
        "Roster seeded with {} active agents",
        state.directory.active_agents().len()
    );

    // Build the Axum router with all route modules
    let app = Router::new()
        .merge(routes::requests::router())
        .merge(routes::agents::router())
        .merge(routes::payouts::router())
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Bind and serve
    let bind_addr = state::bind_addr_from_env();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on {}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
