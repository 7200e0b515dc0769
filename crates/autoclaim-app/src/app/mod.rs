//! Application Layer
//!
//! Orchestrates classifiers, cost tables and the report model for the CLI.

pub mod assessment_service;

pub use assessment_service::{
    assess_images, build_report, AssessmentError, AssessmentRequest, BatchOutcome, ImageFailure,
};
