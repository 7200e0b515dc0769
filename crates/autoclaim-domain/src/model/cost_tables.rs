//! Repair cost reference tables
//!
//! Loaded once at startup and shared read-only. Every lookup resolves to a
//! number: unknown parts, severities, damage types and states fall through a
//! fixed chain of fallbacks instead of producing an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use autoclaim_types::{ConfigError, Error, Part, Result, Severity};

/// Per (part, severity) key used when the exact damage type is not listed
pub const DAMAGE_FALLBACK_KEY: &str = "damage";

/// Labor rate key used when no state is given or the state is unknown
pub const NATIONAL_AVERAGE_KEY: &str = "NationalAverage";

const BUILTIN_NATIONAL_AVERAGE: f64 = 140.0;
const BUILTIN_DEFAULT_LABOR_HOURS: f64 = 2.0;
const BUILTIN_DEFAULT_PART_COST: f64 = 250.0;

/// Which tier of the resolution chain produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTier {
    /// Key present verbatim
    Exact,
    /// (part, severity, "damage") entry
    DamageFallback,
    /// Table-wide default (or national average for labor rates)
    Default,
}

/// A looked-up value together with the tier that resolved it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub value: f64,
    pub tier: LookupTier,
}

impl Resolved {
    fn new(value: f64, tier: LookupTier) -> Self {
        Self { value, tier }
    }
}

/// Values used when a key is missing entirely
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableDefaults {
    pub labor_hours: f64,
    pub part_cost: f64,
}

/// Static lookup tables for labor time, part cost and labor rate
///
/// Layout mirrors the TOML file format:
/// - `labor_rates`: state (underscored, e.g. `New_York`) -> $/hour
/// - `labor_hours`: part -> severity -> lowercase damage type -> hours
/// - `part_costs`: part -> severity -> base part cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostTables {
    pub defaults: TableDefaults,
    pub labor_rates: BTreeMap<String, f64>,
    pub labor_hours: BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>,
    pub part_costs: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Default for CostTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CostTables {
    /// Resolve labor hours: exact -> "damage" fallback -> default
    pub fn resolve_labor_hours(&self, part: &Part, severity: Severity, damage_type: &str) -> Resolved {
        let damage_key = damage_type.trim().to_lowercase();

        let by_damage = self
            .labor_hours
            .get(part.label())
            .and_then(|by_severity| by_severity.get(severity.label()));

        if let Some(by_damage) = by_damage {
            if let Some(hours) = by_damage.get(&damage_key) {
                return Resolved::new(*hours, LookupTier::Exact);
            }
            if let Some(hours) = by_damage.get(DAMAGE_FALLBACK_KEY) {
                debug!(part = %part, %severity, damage_type = %damage_key, "labor hours: using damage fallback");
                return Resolved::new(*hours, LookupTier::DamageFallback);
            }
        }

        debug!(part = %part, %severity, damage_type = %damage_key, "labor hours: using table default");
        Resolved::new(self.defaults.labor_hours, LookupTier::Default)
    }

    pub fn labor_hours(&self, part: &Part, severity: Severity, damage_type: &str) -> f64 {
        self.resolve_labor_hours(part, severity, damage_type).value
    }

    /// Resolve base part cost: exact -> default (no damage-type tier)
    pub fn resolve_part_cost(&self, part: &Part, severity: Severity) -> Resolved {
        match self
            .part_costs
            .get(part.label())
            .and_then(|by_severity| by_severity.get(severity.label()))
        {
            Some(cost) => Resolved::new(*cost, LookupTier::Exact),
            None => {
                debug!(part = %part, %severity, "part cost: using table default");
                Resolved::new(self.defaults.part_cost, LookupTier::Default)
            }
        }
    }

    pub fn part_cost(&self, part: &Part, severity: Severity) -> f64 {
        self.resolve_part_cost(part, severity).value
    }

    /// Resolve the hourly labor rate for a state, falling back to the national average.
    ///
    /// Spaces in the state name are treated as underscores and a
    /// case-insensitive match is tried after the exact key.
    pub fn resolve_labor_rate(&self, state: Option<&str>) -> Resolved {
        if let Some(state) = state {
            let key = state.trim().replace(' ', "_");
            if let Some(rate) = self.labor_rates.get(&key) {
                return Resolved::new(*rate, LookupTier::Exact);
            }
            if let Some((_, rate)) = self
                .labor_rates
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(&key))
            {
                return Resolved::new(*rate, LookupTier::Exact);
            }
            debug!(state = %key, "labor rate: unknown state, using national average");
        }
        Resolved::new(self.national_average_rate(), LookupTier::Default)
    }

    pub fn labor_rate(&self, state: Option<&str>) -> f64 {
        self.resolve_labor_rate(state).value
    }

    pub fn national_average_rate(&self) -> f64 {
        self.labor_rates
            .get(NATIONAL_AVERAGE_KEY)
            .copied()
            .unwrap_or(BUILTIN_NATIONAL_AVERAGE)
    }

    /// Check that the national average is present and every value is a
    /// finite, non-negative number.
    pub fn validate(&self) -> Result<()> {
        if !self.labor_rates.contains_key(NATIONAL_AVERAGE_KEY) {
            return Err(invalid(format!(
                "labor_rates must contain a {} entry",
                NATIONAL_AVERAGE_KEY
            )));
        }

        check_value("defaults.labor_hours", self.defaults.labor_hours)?;
        check_value("defaults.part_cost", self.defaults.part_cost)?;

        for (state, rate) in &self.labor_rates {
            check_value(&format!("labor_rates.{}", state), *rate)?;
        }
        for (part, by_severity) in &self.labor_hours {
            for (severity, by_damage) in by_severity {
                for (damage, hours) in by_damage {
                    check_value(&format!("labor_hours.{}.{}.{}", part, severity, damage), *hours)?;
                }
            }
        }
        for (part, by_severity) in &self.part_costs {
            for (severity, cost) in by_severity {
                check_value(&format!("part_costs.{}.{}", part, severity), *cost)?;
            }
        }
        Ok(())
    }

    /// Built-in reference data
    pub fn builtin() -> Self {
        let labor_rates = [
            (NATIONAL_AVERAGE_KEY, BUILTIN_NATIONAL_AVERAGE),
            ("Maine", 135.0),
            ("New_Hampshire", 127.5),
            ("Vermont", 122.5),
            ("Massachusetts", 132.5),
            ("Rhode_Island", 125.0),
            ("Connecticut", 132.5),
            ("New_York", 137.5),
            ("New_Jersey", 142.5),
            ("Pennsylvania", 137.5),
            ("Ohio", 135.0),
            ("Michigan", 140.0),
            ("Indiana", 140.0),
            ("Illinois", 132.5),
            ("Wisconsin", 137.5),
            ("Minnesota", 142.5),
            ("Iowa", 137.5),
            ("Missouri", 142.5),
            ("North_Dakota", 137.5),
            ("South_Dakota", 140.0),
            ("Nebraska", 142.5),
            ("Kansas", 142.5),
            ("Delaware", 137.5),
            ("Maryland", 140.0),
            ("Virginia", 137.5),
            ("West_Virginia", 142.5),
            ("North_Carolina", 95.0),
            ("South_Carolina", 137.5),
            ("Georgia", 145.0),
            ("Florida", 142.5),
            ("Kentucky", 145.0),
            ("Tennessee", 145.0),
            ("Mississippi", 152.5),
            ("Alabama", 145.0),
            ("Oklahoma", 142.5),
            ("Texas", 142.5),
            ("Arkansas", 145.0),
            ("Louisiana", 145.0),
            ("Idaho", 137.5),
            ("Montana", 145.0),
            ("Wyoming", 152.5),
            ("Nevada", 135.0),
            ("Utah", 137.5),
            ("Colorado", 142.5),
            ("Arizona", 132.5),
            ("New_Mexico", 140.0),
            ("Alaska", 142.5),
            ("Washington", 140.0),
            ("Oregon", 135.0),
            ("California", 165.0),
            ("Hawaii", 130.0),
        ]
        .into_iter()
        .map(|(state, rate)| (state.to_string(), rate))
        .collect();

        let mut labor_hours = BTreeMap::new();
        let mut part_costs = BTreeMap::new();

        insert_part(
            &mut labor_hours,
            &mut part_costs,
            Part::Door,
            [200.0, 450.0, 900.0],
            &[("dent", 1.5), ("scratch", 1.0), ("crack", 2.0), ("damage", 1.5)],
            &[("dent", 3.0), ("scratch", 2.0), ("crack", 3.5), ("damage", 3.0)],
            &[("dent", 5.0), ("scratch", 4.0), ("crack", 6.0), ("damage", 6.0)],
        );
        insert_part(
            &mut labor_hours,
            &mut part_costs,
            Part::Bumper,
            [150.0, 400.0, 750.0],
            &[("dent", 1.5), ("scratch", 1.0), ("crack", 2.0), ("damage", 1.5)],
            &[("dent", 2.5), ("scratch", 2.0), ("crack", 3.0), ("damage", 2.5)],
            &[("crack", 4.0), ("damage", 4.0)],
        );
        insert_part(
            &mut labor_hours,
            &mut part_costs,
            Part::Hood,
            [250.0, 500.0, 1000.0],
            &[("dent", 1.5), ("scratch", 1.0), ("damage", 1.5)],
            &[("dent", 3.0), ("damage", 3.0)],
            &[("damage", 4.5)],
        );
        insert_part(
            &mut labor_hours,
            &mut part_costs,
            Part::Window,
            [100.0, 200.0, 350.0],
            &[("crack", 0.5), ("glass shatter", 1.0), ("damage", 1.0)],
            &[("crack", 1.0), ("glass shatter", 1.5), ("damage", 1.5)],
            &[("glass shatter", 2.0), ("damage", 2.0)],
        );
        insert_part(
            &mut labor_hours,
            &mut part_costs,
            Part::Headlight,
            [120.0, 300.0, 600.0],
            &[("lamp broken", 0.5), ("crack", 0.5), ("damage", 0.5)],
            &[("lamp broken", 1.0), ("damage", 1.0)],
            &[("lamp broken", 1.5), ("damage", 1.5)],
        );
        insert_part(
            &mut labor_hours,
            &mut part_costs,
            Part::Mirror,
            [60.0, 150.0, 300.0],
            &[("crack", 0.5), ("damage", 0.5)],
            &[("damage", 1.0)],
            &[("damage", 1.0)],
        );
        insert_part(
            &mut labor_hours,
            &mut part_costs,
            Part::WindShield,
            [150.0, 350.0, 500.0],
            &[("crack", 0.5), ("damage", 1.0)],
            &[("crack", 1.0), ("glass shatter", 2.0), ("damage", 2.0)],
            &[("glass shatter", 2.5), ("damage", 2.5)],
        );
        insert_part(
            &mut labor_hours,
            &mut part_costs,
            Part::BodyUnknown,
            [300.0, 600.0, 1200.0],
            &[("dent", 2.0), ("scratch", 1.5), ("damage", 2.0)],
            &[("dent", 4.0), ("damage", 4.0)],
            &[("damage", 8.0)],
        );

        Self {
            defaults: TableDefaults {
                labor_hours: BUILTIN_DEFAULT_LABOR_HOURS,
                part_cost: BUILTIN_DEFAULT_PART_COST,
            },
            labor_rates,
            labor_hours,
            part_costs,
        }
    }
}

/// Register labor hours (minor, moderate, severe) and base costs for one part
fn insert_part(
    labor_hours: &mut BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>,
    part_costs: &mut BTreeMap<String, BTreeMap<String, f64>>,
    part: Part,
    costs: [f64; 3],
    minor: &[(&str, f64)],
    moderate: &[(&str, f64)],
    severe: &[(&str, f64)],
) {
    let by_severity = Severity::ALL
        .iter()
        .zip([minor, moderate, severe])
        .map(|(severity, entries)| (severity.label().to_string(), to_map(entries)))
        .collect();
    labor_hours.insert(part.label().to_string(), by_severity);

    let cost_by_severity = Severity::ALL
        .iter()
        .zip(costs)
        .map(|(severity, cost)| (severity.label().to_string(), cost))
        .collect();
    part_costs.insert(part.label().to_string(), cost_by_severity);
}

fn to_map(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect()
}

fn check_value(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be a non-negative number, got {}", name, value)))
    }
}

fn invalid(message: String) -> Error {
    Error::Config(ConfigError::ParseError(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labor_hours_exact() {
        let tables = CostTables::builtin();
        let resolved = tables.resolve_labor_hours(&Part::Door, Severity::Minor, "dent");
        assert_eq!(resolved.tier, LookupTier::Exact);
        assert!((resolved.value - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_labor_hours_damage_type_is_case_insensitive() {
        let tables = CostTables::builtin();
        let resolved = tables.resolve_labor_hours(&Part::Door, Severity::Moderate, "  SCRATCH ");
        assert_eq!(resolved.tier, LookupTier::Exact);
        assert!((resolved.value - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_labor_hours_damage_fallback() {
        let tables = CostTables::builtin();
        let resolved = tables.resolve_labor_hours(&Part::Hood, Severity::Severe, "tire flat");
        assert_eq!(resolved.tier, LookupTier::DamageFallback);
        assert!((resolved.value - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_labor_hours_unknown_part_uses_default() {
        let tables = CostTables::builtin();
        for part in [Part::Unknown, Part::Other("Tail Light".to_string())] {
            let resolved = tables.resolve_labor_hours(&part, Severity::Minor, "dent");
            assert_eq!(resolved.tier, LookupTier::Default);
            assert!((resolved.value - tables.defaults.labor_hours).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_labor_hours_missing_severity_uses_default() {
        let mut tables = CostTables::builtin();
        tables
            .labor_hours
            .get_mut("Mirror")
            .unwrap()
            .remove("Severe");
        let resolved = tables.resolve_labor_hours(&Part::Mirror, Severity::Severe, "crack");
        assert_eq!(resolved.tier, LookupTier::Default);
    }

    #[test]
    fn test_labor_hours_always_finite_and_non_negative() {
        let tables = CostTables::builtin();
        let mut parts = Part::KNOWN.to_vec();
        parts.push(Part::Unknown);
        parts.push(Part::Other("Spoiler".to_string()));
        for part in &parts {
            for severity in Severity::ALL {
                for damage in ["dent", "scratch", "crack", "glass shatter", "lamp broken", "tire flat", ""] {
                    let hours = tables.labor_hours(part, severity, damage);
                    assert!(hours.is_finite() && hours >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_part_cost_exact_and_default() {
        let tables = CostTables::builtin();
        assert!((tables.part_cost(&Part::Door, Severity::Minor) - 200.0).abs() < f64::EPSILON);

        let resolved = tables.resolve_part_cost(&Part::Unknown, Severity::Moderate);
        assert_eq!(resolved.tier, LookupTier::Default);
        assert!((resolved.value - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_labor_rate_lookup() {
        let tables = CostTables::builtin();
        assert!((tables.labor_rate(None) - 140.0).abs() < f64::EPSILON);
        assert!((tables.labor_rate(Some("California")) - 165.0).abs() < f64::EPSILON);
        assert!((tables.labor_rate(Some("New York")) - 137.5).abs() < f64::EPSILON);
        assert!((tables.labor_rate(Some("new_york")) - 137.5).abs() < f64::EPSILON);

        let resolved = tables.resolve_labor_rate(Some("Atlantis"));
        assert_eq!(resolved.tier, LookupTier::Default);
        assert!((resolved.value - 140.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builtin_tables_validate() {
        assert!(CostTables::builtin().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_national_average() {
        let mut tables = CostTables::builtin();
        tables.labor_rates.remove(NATIONAL_AVERAGE_KEY);
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_values() {
        let mut tables = CostTables::builtin();
        tables
            .part_costs
            .get_mut("Door")
            .unwrap()
            .insert("Minor".to_string(), -1.0);
        assert!(tables.validate().is_err());
    }
}
