//! Cost estimation for a single damage observation

use autoclaim_types::{Part, Severity};

use crate::model::{round2, CostEstimate, CostTables, DamageObservation};

/// Combines an observation with the cost tables into a cost breakdown.
///
/// Pure: no I/O, and identical inputs give identical output for the same tables.
#[derive(Debug, Clone, Copy)]
pub struct CostEstimator<'a> {
    tables: &'a CostTables,
}

impl<'a> CostEstimator<'a> {
    pub fn new(tables: &'a CostTables) -> Self {
        Self { tables }
    }

    /// Estimate repair cost. Figures are rounded only when emitted.
    pub fn estimate(
        &self,
        part: &Part,
        severity: Severity,
        damage_type: &str,
        state: Option<&str>,
    ) -> CostEstimate {
        let labor_hours = self.tables.labor_hours(part, severity, damage_type);
        let part_cost = self.tables.part_cost(part, severity);
        let labor_rate = self.tables.labor_rate(state);

        let labor_cost = labor_hours * labor_rate;
        let estimated_cost = part_cost + labor_cost;

        CostEstimate {
            part_cost: round2(part_cost),
            labor_hours: round2(labor_hours),
            labor_rate: round2(labor_rate),
            labor_cost: round2(labor_cost),
            estimated_cost: round2(estimated_cost),
        }
    }

    pub fn estimate_observation(&self, observation: &DamageObservation) -> CostEstimate {
        self.estimate(
            &observation.part,
            observation.severity,
            &observation.damage_type,
            observation.state.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoclaim_types::VehicleInfo;

    #[test]
    fn test_door_minor_dent_national_average() {
        let tables = CostTables::builtin();
        let estimate = CostEstimator::new(&tables).estimate(&Part::Door, Severity::Minor, "dent", None);
        assert_eq!(estimate.part_cost, 200.0);
        assert_eq!(estimate.labor_hours, 1.5);
        assert_eq!(estimate.labor_rate, 140.0);
        assert_eq!(estimate.labor_cost, 210.0);
        assert_eq!(estimate.estimated_cost, 410.0);
    }

    #[test]
    fn test_state_rate_applies() {
        let tables = CostTables::builtin();
        let estimate = CostEstimator::new(&tables).estimate(
            &Part::Bumper,
            Severity::Moderate,
            "scratch",
            Some("California"),
        );
        // 2.0h x 165 = 330, + 400
        assert_eq!(estimate.labor_cost, 330.0);
        assert_eq!(estimate.estimated_cost, 730.0);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let tables = CostTables::builtin();
        let estimator = CostEstimator::new(&tables);
        let a = estimator.estimate(&Part::Window, Severity::Severe, "Glass Shatter", Some("Texas"));
        let b = estimator.estimate(&Part::Window, Severity::Severe, "Glass Shatter", Some("Texas"));
        assert_eq!(a.estimated_cost.to_bits(), b.estimated_cost.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_total_matches_unrounded_sum() {
        let tables = CostTables::builtin();
        let estimator = CostEstimator::new(&tables);
        for part in Part::KNOWN {
            for severity in Severity::ALL {
                for state in [None, Some("New_Hampshire"), Some("Vermont")] {
                    let hours = tables.labor_hours(&part, severity, "dent");
                    let rate = tables.labor_rate(state);
                    let expected = round2(tables.part_cost(&part, severity) + hours * rate);
                    let estimate = estimator.estimate(&part, severity, "dent", state);
                    assert_eq!(estimate.estimated_cost, expected);
                }
            }
        }
    }

    #[test]
    fn test_unknown_part_uses_defaults() {
        let tables = CostTables::builtin();
        let estimate = CostEstimator::new(&tables).estimate(&Part::Unknown, Severity::Minor, "dent", None);
        // 250 + 2.0 x 140
        assert_eq!(estimate.estimated_cost, 530.0);
    }

    #[test]
    fn test_estimate_observation() {
        let tables = CostTables::builtin();
        let observation = DamageObservation {
            part: Part::Door,
            damage_type: "DENT".to_string(),
            severity: Severity::Minor,
            vehicle: VehicleInfo::new("Toyota", "Camry", "2020"),
            state: None,
        };
        let estimate = CostEstimator::new(&tables).estimate_observation(&observation);
        assert_eq!(estimate.estimated_cost, 410.0);
    }
}
