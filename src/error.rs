//! Error taxonomy for the service desk core.
//!
//! The taxonomy is intentionally flat: every failure here is a logical/data
//! condition fully determined by in-memory state and the caller's inputs.
//! The core never performs I/O, so there are no transient failures, retries,
//! or timeouts at this layer.

use axum::http::StatusCode;
use thiserror::Error;

use crate::models::ServiceType;

/// Failures surfaced by the directory and ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Routing found no eligible agent for a service type/country pair.
    /// Callers must treat this as "cannot fulfill this combination right
    /// now", not as a transient error.
    #[error("no active agent available for {service_type:?} in {country}")]
    NoAgentAvailable {
        service_type: ServiceType,
        country: String,
    },

    /// A lookup by id found nothing.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// A required field was missing or out of range.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl LedgerError {
    /// HTTP status the route layer maps this failure to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::NoAgentAvailable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            LedgerError::NotFound { .. } => StatusCode::NOT_FOUND,
            LedgerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}
