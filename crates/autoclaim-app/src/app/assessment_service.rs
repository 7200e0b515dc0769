//! Assessment Service - per-image reports and the batch loop
//!
//! For each image:
//! 1. Validate the image
//! 2. Classify vehicle, part, damage type and severity (one call each)
//! 3. Estimate cost from the tables
//! 4. Optionally build the shopping guide
//!
//! A failing image is logged and skipped; the batch carries on.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::{debug, warn};

use autoclaim_domain::model::{CostTables, DamageObservation, DamageReport, DamagedPart, ShoppingCatalog};
use autoclaim_domain::service::{build_guide, CostEstimator};
use autoclaim_types::{validate_year, Error, VehicleInfo};
use autoclaim_vision::ClassifierSet;

use crate::scanner::validate_image;

/// Errors specific to the assessment service
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Image validation failed: {0}")]
    InvalidImage(String),

    #[error("Classification failed: {0}")]
    ClassificationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<Error> for AssessmentError {
    fn from(err: Error) -> Self {
        match err {
            Error::FileNotFound(msg) | Error::InvalidImageFormat(msg) => {
                AssessmentError::InvalidImage(msg)
            }
            Error::Image(e) => AssessmentError::InvalidImage(e.to_string()),
            Error::Classifier(msg) | Error::AnalysisFailed(msg) => {
                AssessmentError::ClassificationFailed(msg)
            }
            Error::Config(e) => AssessmentError::ConfigError(e.to_string()),
            _ => AssessmentError::ClassificationFailed(err.to_string()),
        }
    }
}

/// Caller-supplied facts shared by every image of a run
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentRequest {
    /// Four-digit model year
    pub year: String,

    /// Labor-rate state; `None` means national average
    pub state: Option<String>,

    /// Attach a shopping guide to each report
    pub include_shopping: bool,
}

impl AssessmentRequest {
    /// Fails on anything but a four-digit year
    pub fn new(year: &str) -> Result<Self, Error> {
        Ok(Self {
            year: validate_year(year)?,
            state: None,
            include_shopping: true,
        })
    }

    /// Blank states are treated as absent
    pub fn with_state(mut self, state: Option<String>) -> Self {
        self.state = state
            .map(|s| s.trim().replace(' ', "_"))
            .filter(|s| !s.is_empty());
        self
    }

    pub fn with_shopping(mut self, include_shopping: bool) -> Self {
        self.include_shopping = include_shopping;
        self
    }
}

/// Build the report for one image
pub fn build_report(
    image_path: &Path,
    classifiers: &ClassifierSet,
    tables: &CostTables,
    catalog: &ShoppingCatalog,
    request: &AssessmentRequest,
) -> Result<DamageReport, AssessmentError> {
    validate_image(image_path)?;

    let identity = classifiers.classify_vehicle(image_path)?;
    let part = classifiers.classify_part(image_path)?;
    let damage_type = classifiers.classify_damage_type(image_path)?;
    let severity = classifiers.classify_severity(image_path)?;

    let observation = DamageObservation {
        part,
        damage_type,
        severity,
        vehicle: VehicleInfo::new(identity.make, identity.model, request.year.clone()),
        state: request.state.clone(),
    };

    let estimate = CostEstimator::new(tables).estimate_observation(&observation);
    debug!(
        image = %image_path.display(),
        part = %observation.part,
        severity = %observation.severity,
        damage_type = %observation.damage_type,
        estimated_cost = estimate.estimated_cost,
        "image assessed"
    );

    let shopping_guide = request.include_shopping.then(|| {
        build_guide(
            catalog,
            &observation.part,
            &estimate,
            &observation.vehicle,
        )
    });

    Ok(DamageReport {
        image_path: image_path.display().to_string(),
        vehicle: observation.vehicle.clone(),
        state: observation.state.clone(),
        damaged_part: DamagedPart::new(&observation, &estimate),
        shopping_guide,
    })
}

/// An image that produced no report
#[derive(Debug)]
pub struct ImageFailure {
    pub image_path: PathBuf,
    pub error: AssessmentError,
}

/// Reports and failures of one batch, both in input order
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub reports: Vec<DamageReport>,
    pub failures: Vec<ImageFailure>,
}

/// Assess every image, skipping the ones that fail
pub fn assess_images(
    images: &[PathBuf],
    classifiers: &ClassifierSet,
    tables: &CostTables,
    catalog: &ShoppingCatalog,
    request: &AssessmentRequest,
    show_progress: bool,
) -> BatchOutcome {
    let pb = if show_progress {
        let pb = ProgressBar::new(images.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut outcome = BatchOutcome::default();

    for image in images {
        let filename = image
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        pb.set_message(filename.clone());

        match build_report(image, classifiers, tables, catalog, request) {
            Ok(report) => outcome.reports.push(report),
            Err(error) => {
                warn!(image = %filename, error = %error, "skipping image");
                outcome.failures.push(ImageFailure {
                    image_path: image.clone(),
                    error,
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();
    outcome
}
