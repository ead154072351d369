//! Domain models for the study-abroad service desk.
//!
//! These structs represent the application's business entities: the human
//! agents who fulfill paid SOP/visa orders, and the service requests routed
//! to them. Nothing here touches storage directly; the ledger in
//! `ledger.rs` and the roster in `directory.rs` own the collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Country value that matches any country for its service type.
pub const GLOBAL_COUNTRY: &str = "Global";

/// Round a money amount to 2 decimal places, half up.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// ============================================================================
// Core Entities
// ============================================================================

/// The two service lines an agent can work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Admission,
    Visa,
}

/// Lifecycle of a service request.
///
/// The nominal progression is pending -> assigned -> in_progress ->
/// completed -> delivered -> paid, but transitions are not enforced: any
/// status may be set from any other, and re-applying a status re-stamps its
/// date. `Paid` is terminal and excludes the request from payout
/// aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Delivered,
    Paid,
}

/// A human agent on the fixed roster.
///
/// Agents are seeded once at startup and never created or deactivated at
/// runtime; the only mutation is earnings/completed-orders bookkeeping when
/// a payout is processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub email: String,
    pub service_type: ServiceType,
    /// Exact-match routing key, or [`GLOBAL_COUNTRY`] to match any country.
    pub country: String,
    /// Informational only; never consulted by routing.
    pub region: String,
    /// Fraction of the order amount paid to the agent, e.g. 0.30.
    pub commission_rate: f64,
    pub total_earnings: f64,
    pub completed_orders: u32,
    pub is_active: bool,
}

/// A paid SOP/service order routed to exactly one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SopRequest {
    pub id: String,
    pub client_email: String,
    pub client_name: String,
    pub country: String,
    pub service_type: ServiceType,
    pub amount: f64,
    /// `round2(amount * agent.commission_rate)`, fixed at creation time and
    /// never recomputed even if the agent's rate later changes.
    pub agent_commission: f64,
    pub agent_id: String,
    pub status: RequestStatus,
    pub request_date: DateTime<Utc>,
    pub assigned_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub delivered_date: Option<DateTime<Utc>>,
    pub paid_date: Option<DateTime<Utc>>,
    /// AI-drafted document text, attached when the request completes.
    pub sop_content: Option<String>,
    /// Free-text enrichment merged in by the caller between creation and
    /// insertion (form details, payment reference, etc).
    pub details: Option<serde_json::Value>,
}

/// Generate a request id from the current timestamp plus a random suffix.
pub fn new_request_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("SOP-{}-{}", now.timestamp_millis(), &suffix[..6])
}

// ============================================================================
// Projections
// ============================================================================

/// Economics projection for one agent.
#[derive(Debug, Clone, Serialize)]
pub struct AgentStats {
    pub agent_id: String,
    pub name: String,
    pub total_earnings: f64,
    pub completed_orders: u32,
    /// `round2(total_earnings / completed_orders)`, 0.0 when the agent has
    /// no completed orders.
    pub avg_earnings_per_order: f64,
}

/// One agent's share of the commission awaiting payout.
#[derive(Debug, Clone, Serialize)]
pub struct PendingPayout {
    pub agent: Agent,
    pub pending_commission: f64,
    pub completed_requests: Vec<SopRequest>,
}

/// Result of crediting one agent during a payout run.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedPayout {
    pub agent_id: String,
    pub amount_paid: f64,
    pub requests_paid: usize,
}

// ============================================================================
// Request Models (Deserialize from JSON input)
// ============================================================================

/// Request body for submitting a new service order.
#[derive(Debug, Deserialize)]
pub struct CreateRequestBody {
    pub email: String,
    pub name: String,
    pub country: String,
    pub service_type: ServiceType,
    pub amount: f64,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Request body for advancing a request through its lifecycle.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: RequestStatus,
    #[serde(default)]
    pub sop_content: Option<String>,
}

/// Query filters for listing requests.
#[derive(Debug, Default, Deserialize)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub agent_id: Option<String>,
}

/// Query filter for listing agents.
#[derive(Debug, Default, Deserialize)]
pub struct AgentFilter {
    pub region: Option<String>,
}

// ============================================================================
// Response Models
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_is_half_up() {
        assert_eq!(round2(149.0 * 0.30), 44.70);
        assert_eq!(round2(149.0 * 0.35), 52.15);
        assert_eq!(round2(10.0), 10.0);
    }

    #[test]
    fn request_ids_are_unique() {
        let now = Utc::now();
        let a = new_request_id(now);
        let b = new_request_id(now);
        assert!(a.starts_with("SOP-"));
        assert_ne!(a, b);
    }

    #[test]
    fn status_serializes_snake_case() {
        let s = serde_json::to_string(&RequestStatus::InProgress).unwrap();
        assert_eq!(s, "\"in_progress\"");
        let t: RequestStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(t, RequestStatus::Delivered);
    }
}
