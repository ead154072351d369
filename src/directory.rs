//! Agent directory and assignment routing.
//!
//! Holds the fixed roster behind a lock and answers routing queries. An
//! incoming request is matched by an ordered list of strategies, each of
//! which either picks an agent or passes:
//!
//! 1. **GlobalOverflow**: visa requests go to the active `Global` visa pool
//!    first, picking the agent with the fewest completed orders. Broadly
//!    available specialists absorb visa overflow before country-specific
//!    routing is consulted.
//! 2. **ExactMatch**: first active agent whose service type and country both
//!    match exactly (case-sensitive). A first-match scan, not least-loaded:
//!    all admission traffic for a country lands on the same agent until that
//!    agent is deactivated.
//!
//! Routing itself never mutates state; the only runtime mutation is
//! [`AgentDirectory::credit_payout`].

use std::sync::RwLock;

use tracing::info;

use crate::error::LedgerError;
use crate::models::{round2, Agent, AgentStats, ServiceType, GLOBAL_COUNTRY};

// ============================================================================
// Routing strategies
// ============================================================================

/// One step of the routing policy. Returns a roster index, or `None` for
/// "no opinion" so the next strategy gets a look.
trait RoutingStrategy {
    fn pick(&self, roster: &[Agent], service_type: ServiceType, country: &str) -> Option<usize>;
}

/// Visa-only: least-loaded active agent in the `Global` pool.
struct GlobalOverflow;

impl RoutingStrategy for GlobalOverflow {
    fn pick(&self, roster: &[Agent], service_type: ServiceType, _country: &str) -> Option<usize> {
        if service_type != ServiceType::Visa {
            return None;
        }
        // First-wins on ties so roster order stays the stable tiebreak.
        let mut best: Option<usize> = None;
        for (i, a) in roster.iter().enumerate() {
            if !a.is_active || a.service_type != ServiceType::Visa || a.country != GLOBAL_COUNTRY {
                continue;
            }
            match best {
                Some(b) if roster[b].completed_orders <= a.completed_orders => {}
                _ => best = Some(i),
            }
        }
        best
    }
}

/// First active agent matching service type and country exactly.
struct ExactMatch;

impl RoutingStrategy for ExactMatch {
    fn pick(&self, roster: &[Agent], service_type: ServiceType, country: &str) -> Option<usize> {
        roster
            .iter()
            .position(|a| a.is_active && a.service_type == service_type && a.country == country)
    }
}

const STRATEGIES: &[&dyn RoutingStrategy] = &[&GlobalOverflow, &ExactMatch];

// ============================================================================
// AgentDirectory
// ============================================================================

/// The roster plus its routing and bookkeeping operations.
pub struct AgentDirectory {
    roster: RwLock<Vec<Agent>>,
}

impl AgentDirectory {
    pub fn new(roster: Vec<Agent>) -> Self {
        Self {
            roster: RwLock::new(roster),
        }
    }

    /// Route a service type/country pair to exactly one agent.
    ///
    /// Pure lookup; evaluates the strategy list in order and returns a
    /// snapshot of the first agent any strategy picks.
    pub fn assign(&self, service_type: ServiceType, country: &str) -> Result<Agent, LedgerError> {
        if country.is_empty() {
            return Err(LedgerError::InvalidInput("country must be non-empty".into()));
        }
        let roster = self.roster.read().unwrap();
        for strategy in STRATEGIES {
            if let Some(i) = strategy.pick(&roster, service_type, country) {
                return Ok(roster[i].clone());
            }
        }
        Err(LedgerError::NoAgentAvailable {
            service_type,
            country: country.to_string(),
        })
    }

    pub fn agent_by_id(&self, id: &str) -> Option<Agent> {
        let roster = self.roster.read().unwrap();
        roster.iter().find(|a| a.id == id).cloned()
    }

    pub fn agents_by_region(&self, region: &str) -> Vec<Agent> {
        let roster = self.roster.read().unwrap();
        roster.iter().filter(|a| a.region == region).cloned().collect()
    }

    pub fn active_agents(&self) -> Vec<Agent> {
        let roster = self.roster.read().unwrap();
        roster.iter().filter(|a| a.is_active).cloned().collect()
    }

    /// Credit a processed payout to an agent's running totals.
    ///
    /// Called only by payout processing; the request lifecycle itself never
    /// touches these counters.
    pub fn credit_payout(
        &self,
        agent_id: &str,
        amount: f64,
        orders: u32,
    ) -> Result<(), LedgerError> {
        let mut roster = self.roster.write().unwrap();
        let agent = roster
            .iter_mut()
            .find(|a| a.id == agent_id)
            .ok_or(LedgerError::NotFound {
                kind: "agent",
                id: agent_id.to_string(),
            })?;
        agent.total_earnings = round2(agent.total_earnings + amount);
        agent.completed_orders += orders;
        info!(
            "Credited {} to agent {} ({} orders, lifetime {})",
            amount, agent_id, orders, agent.total_earnings
        );
        Ok(())
    }

    /// Economics projection for one agent; `None` when the id is unknown.
    pub fn agent_stats(&self, agent_id: &str) -> Option<AgentStats> {
        let roster = self.roster.read().unwrap();
        let agent = roster.iter().find(|a| a.id == agent_id)?;
        let avg = if agent.completed_orders > 0 {
            round2(agent.total_earnings / agent.completed_orders as f64)
        } else {
            0.0
        };
        Some(AgentStats {
            agent_id: agent.id.clone(),
            name: agent.name.clone(),
            total_earnings: agent.total_earnings,
            completed_orders: agent.completed_orders,
            avg_earnings_per_order: avg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visa(id: &str, country: &str, completed: u32, active: bool) -> Agent {
        Agent {
            id: id.into(),
            name: id.into(),
            email: format!("{id}@test.example"),
            service_type: ServiceType::Visa,
            country: country.into(),
            region: "Test".into(),
            commission_rate: 0.40,
            total_earnings: 0.0,
            completed_orders: completed,
            is_active: active,
        }
    }

    fn admission(id: &str, country: &str, active: bool) -> Agent {
        Agent {
            service_type: ServiceType::Admission,
            commission_rate: 0.30,
            ..visa(id, country, 0, active)
        }
    }

    #[test]
    fn assignment_is_deterministic() {
        let dir = AgentDirectory::new(vec![
            admission("a1", "USA", true),
            admission("a2", "USA", true),
        ]);
        let first = dir.assign(ServiceType::Admission, "USA").unwrap();
        let second = dir.assign(ServiceType::Admission, "USA").unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.id, "a1");
    }

    #[test]
    fn global_pool_wins_over_country_specific_visa_agent() {
        let dir = AgentDirectory::new(vec![
            visa("v-usa", "USA", 0, true),
            visa("v-global", GLOBAL_COUNTRY, 50, true),
        ]);
        let picked = dir.assign(ServiceType::Visa, "USA").unwrap();
        assert_eq!(picked.id, "v-global");
    }

    #[test]
    fn global_pool_tiebreak_is_least_loaded() {
        let dir = AgentDirectory::new(vec![
            visa("v-busy", GLOBAL_COUNTRY, 7, true),
            visa("v-idle", GLOBAL_COUNTRY, 3, true),
        ]);
        let picked = dir.assign(ServiceType::Visa, "Anywhere").unwrap();
        assert_eq!(picked.id, "v-idle");
    }

    #[test]
    fn global_pool_equal_load_breaks_by_roster_order() {
        let dir = AgentDirectory::new(vec![
            visa("v-first", GLOBAL_COUNTRY, 5, true),
            visa("v-second", GLOBAL_COUNTRY, 5, true),
        ]);
        let picked = dir.assign(ServiceType::Visa, "Anywhere").unwrap();
        assert_eq!(picked.id, "v-first");
    }

    #[test]
    fn visa_falls_back_to_exact_match_without_global_pool() {
        let dir = AgentDirectory::new(vec![
            visa("v-inactive-global", GLOBAL_COUNTRY, 0, false),
            visa("v-uk", "UK", 4, true),
        ]);
        let picked = dir.assign(ServiceType::Visa, "UK").unwrap();
        assert_eq!(picked.id, "v-uk");
    }

    #[test]
    fn inactive_agents_never_match() {
        let dir = AgentDirectory::new(vec![admission("a-off", "USA", false)]);
        let err = dir.assign(ServiceType::Admission, "USA").unwrap_err();
        assert!(matches!(err, LedgerError::NoAgentAvailable { .. }));
    }

    #[test]
    fn unknown_country_is_no_agent_available() {
        let dir = AgentDirectory::new(vec![admission("a1", "USA", true)]);
        let err = dir.assign(ServiceType::Admission, "Atlantis").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::NoAgentAvailable {
                service_type: ServiceType::Admission,
                ..
            }
        ));
    }

    #[test]
    fn country_match_is_case_sensitive() {
        let dir = AgentDirectory::new(vec![admission("a1", "USA", true)]);
        assert!(dir.assign(ServiceType::Admission, "usa").is_err());
    }

    #[test]
    fn empty_country_is_invalid_input() {
        let dir = AgentDirectory::new(vec![admission("a1", "USA", true)]);
        let err = dir.assign(ServiceType::Admission, "").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }

    #[test]
    fn stats_guard_zero_completed_orders() {
        let mut a = admission("a1", "USA", true);
        a.total_earnings = 0.0;
        a.completed_orders = 0;
        let dir = AgentDirectory::new(vec![a]);
        let stats = dir.agent_stats("a1").unwrap();
        assert_eq!(stats.avg_earnings_per_order, 0.0);
    }

    #[test]
    fn stats_average_is_rounded() {
        let mut a = admission("a1", "USA", true);
        a.total_earnings = 100.0;
        a.completed_orders = 3;
        let dir = AgentDirectory::new(vec![a]);
        let stats = dir.agent_stats("a1").unwrap();
        assert_eq!(stats.avg_earnings_per_order, 33.33);
    }

    #[test]
    fn credit_payout_updates_totals() {
        let dir = AgentDirectory::new(vec![admission("a1", "USA", true)]);
        dir.credit_payout("a1", 80.0, 2).unwrap();
        let a = dir.agent_by_id("a1").unwrap();
        assert_eq!(a.total_earnings, 80.0);
        assert_eq!(a.completed_orders, 2);
        assert!(dir.credit_payout("missing", 1.0, 1).is_err());
    }
}
