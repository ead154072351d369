//! Seed roster of human agents.
//!
//! The roster is fixed at process start; there is no runtime CRUD for
//! agents. Seeded earnings/order counters give payout reporting something
//! to average over from day one and feed the least-loaded tiebreak for the
//! Global visa pool.

use crate::models::{Agent, ServiceType, GLOBAL_COUNTRY};

fn agent(
    id: &str,
    name: &str,
    email: &str,
    service_type: ServiceType,
    country: &str,
    region: &str,
    commission_rate: f64,
    total_earnings: f64,
    completed_orders: u32,
    is_active: bool,
) -> Agent {
    Agent {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        service_type,
        country: country.into(),
        region: region.into(),
        commission_rate,
        total_earnings,
        completed_orders,
        is_active,
    }
}

/// Build the default roster.
///
/// Roster order matters: admission routing is a first-match scan, and ties
/// in the Global visa pool break toward the earlier entry.
pub fn default_roster() -> Vec<Agent> {
    use ServiceType::{Admission, Visa};

    vec![
        agent("agt-001", "Priya Sharma", "priya.sharma@abroadassist.example", Admission, "USA", "North America", 0.35, 4830.50, 23, true),
        agent("agt-002", "Daniel Okafor", "daniel.okafor@abroadassist.example", Admission, "UK", "Europe", 0.35, 3912.00, 18, true),
        agent("agt-003", "Mei-Ling Chen", "meiling.chen@abroadassist.example", Admission, "Canada", "North America", 0.30, 2665.20, 14, true),
        agent("agt-004", "Lucas Ferreira", "lucas.ferreira@abroadassist.example", Admission, "Australia", "Oceania", 0.30, 1788.60, 9, true),
        agent("agt-005", "Anna Keller", "anna.keller@abroadassist.example", Admission, "Germany", "Europe", 0.32, 1430.40, 8, true),
        agent("agt-006", "Tomás Herrera", "tomas.herrera@abroadassist.example", Admission, "Ireland", "Europe", 0.30, 620.10, 4, true),
        // Former France admission specialist, off the books since Q2.
        agent("agt-007", "Robert Iwu", "robert.iwu@abroadassist.example", Admission, "France", "Europe", 0.35, 2210.00, 11, false),
        agent("agt-008", "Sofia Marinova", "sofia.marinova@abroadassist.example", Visa, GLOBAL_COUNTRY, "Europe", 0.40, 6120.00, 31, true),
        agent("agt-009", "Arjun Patel", "arjun.patel@abroadassist.example", Visa, GLOBAL_COUNTRY, "Asia", 0.40, 4480.00, 22, true),
        agent("agt-010", "Grace Muthoni", "grace.muthoni@abroadassist.example", Visa, "USA", "North America", 0.38, 3040.00, 16, true),
        agent("agt-011", "Hasan Demir", "hasan.demir@abroadassist.example", Visa, "UK", "Europe", 0.38, 2280.00, 12, true),
        agent("agt-012", "Elena Volkova", "elena.volkova@abroadassist.example", Visa, "Canada", "North America", 0.36, 1512.00, 7, true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_ids_are_unique() {
        let roster = default_roster();
        let mut ids: Vec<_> = roster.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), roster.len());
    }

    #[test]
    fn roster_has_global_visa_coverage() {
        let roster = default_roster();
        let globals = roster
            .iter()
            .filter(|a| {
                a.is_active && a.service_type == ServiceType::Visa && a.country == GLOBAL_COUNTRY
            })
            .count();
        assert!(globals >= 2, "need at least two Global visa agents for tiebreak coverage");
    }

    #[test]
    fn commission_rates_are_sane() {
        for a in default_roster() {
            assert!(a.commission_rate > 0.0 && a.commission_rate < 1.0, "{}", a.id);
        }
    }
}
