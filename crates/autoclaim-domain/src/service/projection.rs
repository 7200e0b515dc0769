//! Parts-only and labor-only views of an aggregated report

use crate::model::{AggregatedReport, LaborEntry, LaborReport, PartsEntry, PartsReport};

/// Part, damage and part-cost fields, plus any shopping guides
pub fn parts_report(report: &AggregatedReport) -> PartsReport {
    PartsReport {
        vehicle: report.vehicle.clone(),
        timestamp: report.timestamp,
        parts: report
            .damaged_parts
            .iter()
            .map(|p| PartsEntry {
                part: p.part.clone(),
                damage_type: p.damage_type.clone(),
                severity: p.severity,
                part_cost: p.part_cost,
            })
            .collect(),
        total_part_cost: report.summary.total_part_cost,
        shopping_guides: report.shopping_guides.clone(),
    }
}

/// Labor hours and cost fields.
///
/// The first damaged part's rate stands in for the whole report: every
/// image of one run shares the same state, so the rates agree.
pub fn labor_report(report: &AggregatedReport) -> LaborReport {
    LaborReport {
        vehicle: report.vehicle.clone(),
        timestamp: report.timestamp,
        labor_rate: report
            .damaged_parts
            .first()
            .map(|p| p.labor_rate)
            .unwrap_or(0.0),
        labor: report
            .damaged_parts
            .iter()
            .map(|p| LaborEntry {
                part: p.part.clone(),
                damage_type: p.damage_type.clone(),
                severity: p.severity,
                labor_hours: p.labor_hours,
                labor_cost: p.labor_cost,
            })
            .collect(),
        total_labor_hours: report.summary.total_labor_hours,
        total_labor_cost: report.summary.total_labor_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DamagedPart, ReportSummary};
    use autoclaim_types::{Part, Severity, VehicleInfo};
    use chrono::Utc;

    fn sample() -> AggregatedReport {
        let parts = vec![
            DamagedPart {
                part: Part::Door,
                damage_type: "dent".to_string(),
                severity: Severity::Minor,
                part_cost: 200.0,
                labor_hours: 1.5,
                labor_rate: 137.5,
                labor_cost: 206.25,
                estimated_cost: 406.25,
            },
            DamagedPart {
                part: Part::Mirror,
                damage_type: "crack".to_string(),
                severity: Severity::Minor,
                part_cost: 60.0,
                labor_hours: 0.5,
                labor_rate: 137.5,
                labor_cost: 68.75,
                estimated_cost: 128.75,
            },
        ];
        AggregatedReport {
            vehicle: Some(VehicleInfo::new("Ford", "Focus", "2015")),
            damaged_parts: parts,
            timestamp: Utc::now(),
            summary: ReportSummary {
                total_damages: 2,
                total_part_cost: 260.0,
                total_labor_hours: 2.0,
                total_labor_cost: 275.0,
                total_estimated_cost: 535.0,
            },
            shopping_guides: None,
        }
    }

    #[test]
    fn test_parts_report() {
        let report = sample();
        let parts = parts_report(&report);
        assert_eq!(parts.parts.len(), 2);
        assert_eq!(parts.parts[1].part, Part::Mirror);
        assert_eq!(parts.total_part_cost, 260.0);
        assert_eq!(parts.timestamp, report.timestamp);

        let json = serde_json::to_value(&parts).unwrap();
        assert!(json["parts"][0].get("labor_cost").is_none());
        assert!(json.get("shopping_guides").is_none());
    }

    #[test]
    fn test_labor_report_uses_first_rate() {
        let labor = labor_report(&sample());
        assert_eq!(labor.labor_rate, 137.5);
        assert_eq!(labor.labor.len(), 2);
        assert_eq!(labor.total_labor_cost, 275.0);

        let json = serde_json::to_value(&labor).unwrap();
        assert!(json["labor"][0].get("part_cost").is_none());
    }

    #[test]
    fn test_labor_report_of_empty_aggregate() {
        let labor = labor_report(&AggregatedReport::empty());
        assert_eq!(labor.labor_rate, 0.0);
        assert!(labor.labor.is_empty());
    }
}
