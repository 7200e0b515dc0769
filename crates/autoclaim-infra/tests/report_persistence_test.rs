//! Writing aggregated reports to an output directory

use std::fs;

use autoclaim_domain::model::{
    AggregatedReport, CostTables, DamageObservation, DamageReport, DamagedPart, ReportKind,
    ShoppingCatalog,
};
use autoclaim_domain::repository::ReportRepository;
use autoclaim_domain::service::{aggregate, build_guide, CostEstimator};
use autoclaim_infra::persistence::FileReportRepository;
use autoclaim_types::{Part, Severity, VehicleInfo};
use tempfile::TempDir;

fn report(part: Part, severity: Severity, damage_type: &str, with_guide: bool) -> DamageReport {
    let tables = CostTables::builtin();
    let catalog = ShoppingCatalog::builtin();
    let vehicle = VehicleInfo::new("Honda", "Accord", "2020");
    let observation = DamageObservation {
        part: part.clone(),
        damage_type: damage_type.to_string(),
        severity,
        vehicle: vehicle.clone(),
        state: None,
    };
    let estimate = CostEstimator::new(&tables).estimate_observation(&observation);
    let shopping_guide = with_guide.then(|| {
        build_guide(&catalog, &part, &estimate, &vehicle)
    });
    DamageReport {
        image_path: format!("input/{}.jpg", part.label().to_lowercase()),
        vehicle,
        state: None,
        damaged_part: DamagedPart::new(&observation, &estimate),
        shopping_guide,
    }
}

fn sample(with_guides: bool) -> AggregatedReport {
    aggregate(&[
        report(Part::Door, Severity::Minor, "dent", with_guides),
        report(Part::Bumper, Severity::Moderate, "dent", with_guides),
    ])
}

#[test]
fn test_second_write_gets_next_number() {
    let temp = TempDir::new().unwrap();
    let repo = FileReportRepository::new(temp.path());
    let first_report = sample(false);

    let first = repo.save(&first_report, ReportKind::Full).unwrap().unwrap();
    let first_contents = fs::read_to_string(&first).unwrap();

    let second = repo.save(&sample(false), ReportKind::Full).unwrap().unwrap();

    assert_eq!(first, temp.path().join("report.json"));
    assert_eq!(second, temp.path().join("report(1).json"));
    assert_eq!(fs::read_to_string(&first).unwrap(), first_contents);

    let parsed: AggregatedReport = serde_json::from_str(&first_contents).unwrap();
    assert_eq!(parsed, first_report);
    assert_eq!(parsed.summary.total_estimated_cost, 1160.0);
}

#[test]
fn test_all_views_written() {
    let temp = TempDir::new().unwrap();
    let repo = FileReportRepository::new(temp.path().join("outputs"));
    let aggregated = sample(true);

    let paths: Vec<_> = ReportKind::ALL
        .iter()
        .map(|kind| repo.save(&aggregated, *kind).unwrap().unwrap())
        .collect();

    let names: Vec<_> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["report.json", "parts_report.json", "labor_report.json", "shopping_guide.txt"]
    );

    let labor: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths[2]).unwrap()).unwrap();
    assert_eq!(labor["labor_rate"], 140.0);
    assert_eq!(labor["total_labor_cost"], 560.0);

    let parts: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths[1]).unwrap()).unwrap();
    assert_eq!(parts["total_part_cost"], 600.0);
    assert_eq!(parts["shopping_guides"].as_array().unwrap().len(), 2);

    let guide = fs::read_to_string(&paths[3]).unwrap();
    assert!(guide.contains("PART 1: Door"));
    assert!(guide.contains("PART 2: Bumper"));
    assert!(guide.contains("https://www.rockauto.com/en/catalog/2020,honda,accord"));
}

#[test]
fn test_shopping_guide_skipped_without_guides() {
    let temp = TempDir::new().unwrap();
    let repo = FileReportRepository::new(temp.path());

    let written = repo.save(&sample(false), ReportKind::ShoppingGuide).unwrap();
    assert!(written.is_none());
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}
