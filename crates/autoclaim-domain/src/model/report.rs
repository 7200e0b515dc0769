//! Report data types: per-image reports, the aggregate and its projections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use autoclaim_types::{Part, Severity, VehicleInfo};

use super::shopping_guide::ShoppingGuide;

/// Classification result for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageObservation {
    pub part: Part,
    /// Free-form label from the damage classifier ("dent", "scratch", ...)
    pub damage_type: String,
    pub severity: Severity,
    pub vehicle: VehicleInfo,
    /// Labor-rate locale, underscored state name
    #[serde(default)]
    pub state: Option<String>,
}

/// Cost breakdown for one observation, rounded to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub part_cost: f64,
    pub labor_hours: f64,
    pub labor_rate: f64,
    pub labor_cost: f64,
    pub estimated_cost: f64,
}

/// One damaged-part entry: classification plus its cost estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamagedPart {
    pub part: Part,
    pub damage_type: String,
    pub severity: Severity,
    pub part_cost: f64,
    pub labor_hours: f64,
    pub labor_rate: f64,
    pub labor_cost: f64,
    pub estimated_cost: f64,
}

impl DamagedPart {
    pub fn new(observation: &DamageObservation, estimate: &CostEstimate) -> Self {
        Self {
            part: observation.part.clone(),
            damage_type: observation.damage_type.clone(),
            severity: observation.severity,
            part_cost: estimate.part_cost,
            labor_hours: estimate.labor_hours,
            labor_rate: estimate.labor_rate,
            labor_cost: estimate.labor_cost,
            estimated_cost: estimate.estimated_cost,
        }
    }
}

/// Report for a single image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageReport {
    pub image_path: String,
    pub vehicle: VehicleInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub damaged_part: DamagedPart,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping_guide: Option<ShoppingGuide>,
}

/// Totals across all damaged parts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_damages: usize,
    pub total_part_cost: f64,
    pub total_labor_hours: f64,
    pub total_labor_cost: f64,
    pub total_estimated_cost: f64,
}

/// Summary report over every successfully processed image of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedReport {
    /// Taken from the first input report; `None` only for the empty aggregate
    #[serde(default)]
    pub vehicle: Option<VehicleInfo>,
    pub damaged_parts: Vec<DamagedPart>,
    /// When the aggregation ran
    pub timestamp: DateTime<Utc>,
    pub summary: ReportSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping_guides: Option<Vec<ShoppingGuide>>,
}

impl AggregatedReport {
    /// The aggregate of zero reports
    pub fn empty() -> Self {
        Self {
            vehicle: None,
            damaged_parts: Vec::new(),
            timestamp: Utc::now(),
            summary: ReportSummary::default(),
            shopping_guides: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.damaged_parts.is_empty()
    }

    pub fn shopping_guides(&self) -> &[ShoppingGuide] {
        self.shopping_guides.as_deref().unwrap_or(&[])
    }
}

/// Parts-only row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartsEntry {
    pub part: Part,
    pub damage_type: String,
    pub severity: Severity,
    pub part_cost: f64,
}

/// Parts-only projection of an aggregated report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartsReport {
    #[serde(default)]
    pub vehicle: Option<VehicleInfo>,
    pub timestamp: DateTime<Utc>,
    pub parts: Vec<PartsEntry>,
    pub total_part_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping_guides: Option<Vec<ShoppingGuide>>,
}

/// Labor-only row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborEntry {
    pub part: Part,
    pub damage_type: String,
    pub severity: Severity,
    pub labor_hours: f64,
    pub labor_cost: f64,
}

/// Labor-only projection of an aggregated report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborReport {
    #[serde(default)]
    pub vehicle: Option<VehicleInfo>,
    pub timestamp: DateTime<Utc>,
    /// Rate of the first damaged part, representative for the whole run
    pub labor_rate: f64,
    pub labor: Vec<LaborEntry>,
    pub total_labor_hours: f64,
    pub total_labor_cost: f64,
}

/// The four artifacts derivable from one aggregated report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Full,
    Parts,
    Labor,
    ShoppingGuide,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Full,
        ReportKind::Parts,
        ReportKind::Labor,
        ReportKind::ShoppingGuide,
    ];

    /// File name stem, before any `(N)` suffix
    pub fn base_name(&self) -> &'static str {
        match self {
            ReportKind::Full => "report",
            ReportKind::Parts => "parts_report",
            ReportKind::Labor => "labor_report",
            ReportKind::ShoppingGuide => "shopping_guide",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportKind::ShoppingGuide => "txt",
            _ => "json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Full => "Complete report",
            ReportKind::Parts => "Parts report",
            ReportKind::Labor => "Labor report",
            ReportKind::ShoppingGuide => "Shopping guide",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_kind_file_names() {
        assert_eq!(ReportKind::Full.base_name(), "report");
        assert_eq!(ReportKind::Parts.extension(), "json");
        assert_eq!(ReportKind::ShoppingGuide.extension(), "txt");
    }

    #[test]
    fn test_empty_aggregate() {
        let report = AggregatedReport::empty();
        assert!(report.is_empty());
        assert!(report.vehicle.is_none());
        assert_eq!(report.summary, ReportSummary::default());
        assert!(report.shopping_guides().is_empty());
    }
}
