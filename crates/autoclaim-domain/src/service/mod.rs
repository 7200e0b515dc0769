//! Domain services

pub mod aggregator;
pub mod cost_estimator;
pub mod projection;
pub mod shopping_guide;

pub use aggregator::aggregate;
pub use cost_estimator::CostEstimator;
pub use projection::{labor_report, parts_report};
pub use shopping_guide::{
    build_guide, format_shopping_report, purchase_options, render_report_guides, retailer_links,
};
