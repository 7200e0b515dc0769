//! Aggregation of per-image reports into one summary report

use chrono::Utc;
use tracing::warn;

use crate::model::{round2, AggregatedReport, DamageReport, ReportSummary};

/// Merge per-image reports into one aggregate.
///
/// Vehicle identity comes from the first report. Parts are kept in input
/// order and never deduplicated: each image is an independent observation.
/// An empty input yields [`AggregatedReport::empty`].
pub fn aggregate(reports: &[DamageReport]) -> AggregatedReport {
    let Some(first) = reports.first() else {
        return AggregatedReport::empty();
    };

    let vehicle = first.vehicle.clone();
    let mut damaged_parts = Vec::with_capacity(reports.len());
    let mut shopping_guides = Vec::new();
    let mut part_cost = 0.0;
    let mut labor_hours = 0.0;
    let mut labor_cost = 0.0;
    let mut estimated_cost = 0.0;

    for report in reports {
        if report.vehicle != vehicle {
            warn!(
                image = %report.image_path,
                expected = %vehicle.display_name(),
                found = %report.vehicle.display_name(),
                "vehicle differs from the first report; aggregating anyway"
            );
        }

        let part = &report.damaged_part;
        part_cost += part.part_cost;
        labor_hours += part.labor_hours;
        labor_cost += part.labor_cost;
        estimated_cost += part.estimated_cost;
        damaged_parts.push(part.clone());

        if let Some(ref guide) = report.shopping_guide {
            shopping_guides.push(guide.clone());
        }
    }

    AggregatedReport {
        vehicle: Some(vehicle),
        summary: ReportSummary {
            total_damages: damaged_parts.len(),
            total_part_cost: round2(part_cost),
            total_labor_hours: round2(labor_hours),
            total_labor_cost: round2(labor_cost),
            total_estimated_cost: round2(estimated_cost),
        },
        damaged_parts,
        timestamp: Utc::now(),
        shopping_guides: if shopping_guides.is_empty() {
            None
        } else {
            Some(shopping_guides)
        },
    }
}
