//! Shared application state for the Axum routes.
//!
//! There is no database: the roster and the request ledger live in process
//! memory and reset on restart. Both are shared across the handler tasks
//! via `Arc`, with the interior locking owned by the directory and the
//! store themselves.

use std::sync::Arc;

use crate::directory::AgentDirectory;
use crate::ledger::{MemoryLedger, RequestStore};
use crate::roster;

/// State injected into every route handler.
///
/// Usage in route handlers:
/// ```ignore
/// async fn my_handler(
///     Extension(state): Extension<AppState>,
/// ) -> impl IntoResponse {
///     let agent = state.directory.agent_by_id("agt-001");
/// }
/// ```
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<AgentDirectory>,
    pub ledger: Arc<dyn RequestStore>,
}

impl AppState {
    /// State backed by the default seed roster and an empty ledger.
    pub fn seeded() -> Self {
        Self {
            directory: Arc::new(AgentDirectory::new(roster::default_roster())),
            ledger: Arc::new(MemoryLedger::new()),
        }
    }
}

/// Bind address for the HTTP server, `BIND_ADDR` env override.
pub fn bind_addr_from_env() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}
