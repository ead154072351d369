//! Request ledger: storage trait, in-memory store, and the order/payout
//! operations built on top of them.
//!
//! Storage sits behind [`RequestStore`] so the routing and commission rules
//! are testable without shared globals and portable to a persistent backend
//! later. [`MemoryLedger`] is the only implementation today: an append-only
//! in-process list that resets on restart.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use tracing::{info, warn};

use crate::directory::AgentDirectory;
use crate::error::LedgerError;
use crate::models::{
    new_request_id, round2, CreateRequestBody, PendingPayout, ProcessedPayout, RequestStatus,
    SopRequest,
};

// ============================================================================
// Storage
// ============================================================================

/// Storage contract for service requests.
pub trait RequestStore: Send + Sync {
    /// Append a request. No de-duplication: saving the same id twice
    /// duplicates the row, so callers save exactly once per logical request.
    fn save(&self, request: SopRequest);

    fn find_by_id(&self, id: &str) -> Option<SopRequest>;

    fn by_status(&self, status: RequestStatus) -> Vec<SopRequest>;

    fn by_agent(&self, agent_id: &str) -> Vec<SopRequest>;

    fn all(&self) -> Vec<SopRequest>;

    /// Set a request's status, stamping the matching date field. Returns
    /// false when the id is unknown. Transitions are deliberately
    /// permissive: any status may follow any other, and re-applying a
    /// status overwrites its stamp with a newer timestamp.
    fn update_status(
        &self,
        id: &str,
        status: RequestStatus,
        sop_content: Option<String>,
    ) -> bool;

    /// Drain every request eligible for payout: collect the
    /// `completed`/`delivered` requests, mark each `paid`, and stamp
    /// `paid_date`, all as one atomic step. Selection and marking must not
    /// be observable separately, so two concurrent payout runs can never
    /// claim the same request.
    fn drain_payable(&self) -> Vec<SopRequest>;
}

/// In-memory request ledger.
pub struct MemoryLedger {
    requests: RwLock<Vec<SopRequest>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            requests: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestStore for MemoryLedger {
    fn save(&self, request: SopRequest) {
        self.requests.write().unwrap().push(request);
    }

    fn find_by_id(&self, id: &str) -> Option<SopRequest> {
        let requests = self.requests.read().unwrap();
        requests.iter().find(|r| r.id == id).cloned()
    }

    fn by_status(&self, status: RequestStatus) -> Vec<SopRequest> {
        let requests = self.requests.read().unwrap();
        requests.iter().filter(|r| r.status == status).cloned().collect()
    }

    fn by_agent(&self, agent_id: &str) -> Vec<SopRequest> {
        let requests = self.requests.read().unwrap();
        requests.iter().filter(|r| r.agent_id == agent_id).cloned().collect()
    }

    fn all(&self) -> Vec<SopRequest> {
        self.requests.read().unwrap().clone()
    }

    fn update_status(
        &self,
        id: &str,
        status: RequestStatus,
        sop_content: Option<String>,
    ) -> bool {
        let mut requests = self.requests.write().unwrap();
        let Some(request) = requests.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        let now = Utc::now();
        request.status = status;
        match status {
            RequestStatus::Assigned => request.assigned_date = Some(now),
            RequestStatus::Completed => {
                request.completed_date = Some(now);
                if sop_content.is_some() {
                    request.sop_content = sop_content;
                }
            }
            RequestStatus::Delivered => request.delivered_date = Some(now),
            RequestStatus::Paid => request.paid_date = Some(now),
            RequestStatus::Pending | RequestStatus::InProgress => {}
        }
        true
    }

    fn drain_payable(&self) -> Vec<SopRequest> {
        // One write lock across select-and-mark keeps payout runs from
        // racing each other into a double credit.
        let mut requests = self.requests.write().unwrap();
        let now = Utc::now();
        let mut drained = Vec::new();
        for request in requests.iter_mut() {
            if matches!(request.status, RequestStatus::Completed | RequestStatus::Delivered) {
                request.status = RequestStatus::Paid;
                request.paid_date = Some(now);
                drained.push(request.clone());
            }
        }
        drained
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Build a new request: validate, route to an agent, fix the commission.
///
/// Does NOT insert the request into the store. Insertion is the caller's
/// separate [`RequestStore::save`] call, which leaves room to enrich the
/// record (form details, payment reference) before it is persisted.
pub fn create_request(
    directory: &AgentDirectory,
    body: &CreateRequestBody,
) -> Result<SopRequest, LedgerError> {
    if body.email.is_empty() {
        return Err(LedgerError::InvalidInput("email is required".into()));
    }
    if body.amount <= 0.0 || !body.amount.is_finite() {
        return Err(LedgerError::InvalidInput("amount must be positive".into()));
    }

    let agent = directory.assign(body.service_type, &body.country)?;
    let now = Utc::now();
    let request = SopRequest {
        id: new_request_id(now),
        client_email: body.email.clone(),
        client_name: body.name.clone(),
        country: body.country.clone(),
        service_type: body.service_type,
        amount: body.amount,
        agent_commission: round2(body.amount * agent.commission_rate),
        agent_id: agent.id.clone(),
        status: RequestStatus::Pending,
        request_date: now,
        assigned_date: None,
        completed_date: None,
        delivered_date: None,
        paid_date: None,
        sop_content: None,
        details: body.details.clone(),
    };

    info!(
        "Request {} routed to agent {} (commission {})",
        request.id, agent.id, request.agent_commission
    );
    Ok(request)
}

/// Group requests by agent, preserving first-seen order, with the rounded
/// commission total per group.
fn group_by_agent(requests: Vec<SopRequest>) -> Vec<(String, f64, Vec<SopRequest>)> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<SopRequest>> = HashMap::new();
    for request in requests {
        if !groups.contains_key(&request.agent_id) {
            order.push(request.agent_id.clone());
        }
        groups.entry(request.agent_id.clone()).or_default().push(request);
    }

    let mut grouped = Vec::with_capacity(order.len());
    for agent_id in order {
        let requests = groups.remove(&agent_id).unwrap_or_default();
        let total = round2(requests.iter().map(|r| r.agent_commission).sum());
        grouped.push((agent_id, total, requests));
    }
    grouped
}

/// Group unpaid commission by agent.
///
/// Considers requests in `completed` or `delivered` status; `paid` requests
/// are excluded so repeated payout runs never double-count. Agents with no
/// qualifying request are omitted rather than reported with a zero total.
pub fn pending_payouts(store: &dyn RequestStore, directory: &AgentDirectory) -> Vec<PendingPayout> {
    let payable = store
        .all()
        .into_iter()
        .filter(|r| matches!(r.status, RequestStatus::Completed | RequestStatus::Delivered))
        .collect();

    let mut payouts = Vec::new();
    for (agent_id, total, requests) in group_by_agent(payable) {
        let Some(agent) = directory.agent_by_id(&agent_id) else {
            // Ledger rows always reference roster agents; a miss means the
            // seed data and the ledger disagree.
            warn!("Request references unknown agent {agent_id}; skipping payout group");
            continue;
        };
        payouts.push(PendingPayout {
            agent,
            pending_commission: total,
            completed_requests: requests,
        });
    }
    payouts
}

/// Pay out every payable request: drain the pending pool in one atomic step,
/// then credit each agent's lifetime totals.
///
/// Draining marks the requests `paid` under the store's write lock, so a
/// request is claimed by exactly one run: concurrent runs cannot observe
/// the same pool, and a second run over a drained pool is a no-op.
pub fn process_payouts(
    store: &dyn RequestStore,
    directory: &AgentDirectory,
) -> Vec<ProcessedPayout> {
    let mut processed = Vec::new();
    for (agent_id, total, requests) in group_by_agent(store.drain_payable()) {
        if let Err(e) = directory.credit_payout(&agent_id, total, requests.len() as u32) {
            warn!("Skipping payout credit: {e}");
            continue;
        }
        info!(
            "Paid out {} to agent {} across {} requests",
            total,
            agent_id,
            requests.len()
        );
        processed.push(ProcessedPayout {
            agent_id,
            amount_paid: total,
            requests_paid: requests.len(),
        });
    }
    processed
}
