//! Vision module - classifier seams for damage assessment
//!
//! The four recognisers (vehicle, part, damage type, severity) are external
//! collaborators. This crate defines what is asked of them and converts their
//! raw labels into the typed vocabulary of `autoclaim-types`.

pub mod command;

pub use command::CommandClassifier;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use autoclaim_types::{Error, Part, Result, Severity};

/// Make and model recognised from a photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleIdentity {
    pub make: String,
    pub model: String,
}

/// Single-label prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl Prediction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Recognises the make and model of the vehicle in an image
pub trait VehicleClassifier {
    fn classify(&self, image_path: &Path) -> Result<VehicleIdentity>;
}

/// Recognises one label (part, damage type or severity) in an image
pub trait LabelClassifier {
    fn classify(&self, image_path: &Path) -> Result<Prediction>;
}

/// The four classifiers used to assess one image
pub struct ClassifierSet {
    vehicle: Box<dyn VehicleClassifier>,
    part: Box<dyn LabelClassifier>,
    damage: Box<dyn LabelClassifier>,
    severity: Box<dyn LabelClassifier>,
    part_min_confidence: Option<f64>,
}

impl ClassifierSet {
    pub fn new(
        vehicle: Box<dyn VehicleClassifier>,
        part: Box<dyn LabelClassifier>,
        damage: Box<dyn LabelClassifier>,
        severity: Box<dyn LabelClassifier>,
    ) -> Self {
        Self {
            vehicle,
            part,
            damage,
            severity,
            part_min_confidence: None,
        }
    }

    /// Part predictions below this confidence are reported as `Part::Unknown`
    pub fn with_part_min_confidence(mut self, min_confidence: Option<f64>) -> Self {
        self.part_min_confidence = min_confidence;
        self
    }

    pub fn classify_vehicle(&self, image_path: &Path) -> Result<VehicleIdentity> {
        let identity = self.vehicle.classify(image_path)?;
        debug!(make = %identity.make, model = %identity.model, "vehicle recognised");
        Ok(identity)
    }

    pub fn classify_part(&self, image_path: &Path) -> Result<Part> {
        let prediction = self.part.classify(image_path)?;
        if let (Some(min), Some(confidence)) = (self.part_min_confidence, prediction.confidence) {
            if confidence < min {
                debug!(label = %prediction.label, confidence, min, "part below confidence threshold");
                return Ok(Part::Unknown);
            }
        }
        Ok(Part::from_label(&prediction.label))
    }

    /// Damage type label, trimmed and lowercased for table lookup
    pub fn classify_damage_type(&self, image_path: &Path) -> Result<String> {
        let prediction = self.damage.classify(image_path)?;
        Ok(prediction.label.trim().to_lowercase())
    }

    pub fn classify_severity(&self, image_path: &Path) -> Result<Severity> {
        let prediction = self.severity.classify(image_path)?;
        prediction.label.parse::<Severity>().map_err(|_| {
            Error::AnalysisFailed(format!(
                "severity classifier returned unknown label '{}'",
                prediction.label
            ))
        })
    }
}

/// Extract JSON from classifier output (handles markdown code blocks)
pub fn extract_json_from_response(response: &str) -> String {
    let response = response.trim();

    if response.starts_with("```") {
        if let Some(end) = response.rfind("```") {
            let start = response.find('\n').map(|i| i + 1).unwrap_or(response.len());
            if start < end {
                return response[start..end].trim().to_string();
            }
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if start < end {
                return response[start..=end].to_string();
            }
        }
    }

    response.to_string()
}
