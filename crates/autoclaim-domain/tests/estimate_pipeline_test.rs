//! Estimation through aggregation with the built-in tables

use autoclaim_domain::model::{
    CostTables, DamageObservation, DamageReport, DamagedPart, LookupTier, ShoppingCatalog,
};
use autoclaim_domain::service::{aggregate, build_guide, labor_report, parts_report, CostEstimator};
use autoclaim_types::{Part, Severity, VehicleInfo};

const EPSILON: f64 = 1e-9;

fn observation(part: Part, severity: Severity, damage_type: &str, state: Option<&str>) -> DamageObservation {
    DamageObservation {
        part,
        damage_type: damage_type.to_string(),
        severity,
        vehicle: VehicleInfo::new("Toyota", "Camry", "2018"),
        state: state.map(str::to_string),
    }
}

fn report_for(tables: &CostTables, observation: &DamageObservation) -> DamageReport {
    let estimate = CostEstimator::new(tables).estimate_observation(observation);
    DamageReport {
        image_path: "input/car.jpg".to_string(),
        vehicle: observation.vehicle.clone(),
        state: observation.state.clone(),
        damaged_part: DamagedPart::new(observation, &estimate),
        shopping_guide: None,
    }
}

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
fn test_lookups_never_fail() {
    let tables = CostTables::builtin();
    let mut parts = Part::KNOWN.to_vec();
    parts.push(Part::Unknown);
    parts.push(Part::Other("Tail Light".to_string()));

    for part in &parts {
        for severity in Severity::ALL {
            for damage in ["dent", "scratch", "crack", "glass shatter", "lamp broken", "", "??"] {
                let hours = tables.labor_hours(part, severity, damage);
                assert!(hours.is_finite() && hours >= 0.0);
            }
            let cost = tables.part_cost(part, severity);
            assert!(cost.is_finite() && cost >= 0.0);
        }
    }
}

#[test]
fn test_absent_part_cost_is_default() {
    let tables = CostTables::builtin();
    let resolved = tables.resolve_part_cost(&Part::Other("Spoiler".to_string()), Severity::Severe);
    assert_eq!(resolved.tier, LookupTier::Default);
    assert_eq!(resolved.value, tables.defaults.part_cost);
}

#[test]
fn test_aggregate_sums_match_reports() {
    let tables = CostTables::builtin();
    let observations = [
        observation(Part::Door, Severity::Minor, "dent", Some("New York")),
        observation(Part::Headlight, Severity::Moderate, "lamp broken", Some("New York")),
        observation(Part::Hood, Severity::Severe, "crumpled", Some("New York")),
    ];
    let reports: Vec<_> = observations.iter().map(|o| report_for(&tables, o)).collect();
    let aggregated = aggregate(&reports);

    assert_eq!(aggregated.summary.total_damages, 3);
    let expected: f64 = reports.iter().map(|r| r.damaged_part.estimated_cost).sum();
    assert!((aggregated.summary.total_estimated_cost - expected).abs() < EPSILON);

    let order: Vec<_> = aggregated.damaged_parts.iter().map(|p| p.part.clone()).collect();
    assert_eq!(order, vec![Part::Door, Part::Headlight, Part::Hood]);

    let labor = labor_report(&aggregated);
    assert_eq!(labor.labor_rate, tables.labor_rate(Some("New York")));
    assert_eq!(parts_report(&aggregated).parts.len(), 3);
}

#[test]
fn test_guide_prices_follow_estimate() {
    let tables = CostTables::builtin();
    let catalog = ShoppingCatalog::builtin();
    let obs = observation(Part::Mirror, Severity::Moderate, "damage", None);
    let estimate = CostEstimator::new(&tables).estimate_observation(&obs);
    let guide = build_guide(&catalog, &obs.part, &estimate, &obs.vehicle);

    assert_eq!(guide.cost_breakdown.estimated_total, estimate.estimated_cost);
    assert_eq!(guide.shopping_options.len(), 4);
    assert_eq!(guide.shopping_options[1].price_range.estimated, estimate.part_cost);
}

#[test]
fn test_guide_total_matches_estimate_with_custom_rates() {
    let mut tables = CostTables::builtin();
    tables.labor_rates.insert("Testland".to_string(), 100.004);
    tables
        .part_costs
        .entry(Part::Door.label().to_string())
        .or_default()
        .insert(Severity::Minor.label().to_string(), 100.004);
    tables
        .labor_hours
        .entry(Part::Door.label().to_string())
        .or_default()
        .entry(Severity::Minor.label().to_string())
        .or_default()
        .insert("dent".to_string(), 1.0);

    let obs = observation(Part::Door, Severity::Minor, "dent", Some("Testland"));
    let estimate = CostEstimator::new(&tables).estimate_observation(&obs);
    assert_eq!(estimate.part_cost, 100.0);
    assert_eq!(estimate.labor_cost, 100.0);
    assert_eq!(estimate.estimated_cost, 200.01);

    let guide = build_guide(&ShoppingCatalog::builtin(), &obs.part, &estimate, &obs.vehicle);
    assert_eq!(guide.cost_breakdown.estimated_total, estimate.estimated_cost);
    assert_eq!(
        guide.cost_breakdown.estimated_total,
        DamagedPart::new(&obs, &estimate).estimated_cost
    );
}
