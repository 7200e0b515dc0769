//! Domain model types

pub mod cost_tables;
pub mod report;
pub mod shopping_guide;

pub use cost_tables::{CostTables, LookupTier, Resolved, TableDefaults};
pub use report::{
    AggregatedReport, CostEstimate, DamageObservation, DamageReport, DamagedPart, LaborEntry,
    LaborReport, PartsEntry, PartsReport, ReportKind, ReportSummary,
};
pub use shopping_guide::{
    CostBreakdown, PriceRange, PurchaseOption, PurchaseTier, Retailer, RetailerLink,
    ShoppingCatalog, ShoppingGuide,
};

/// Round a currency or hour figure to 2 decimal places for output
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
