//! Shared vocabulary for damage assessment

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Damaged vehicle part as reported by the part classifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Part {
    Door,
    Window,
    Headlight,
    Mirror,
    /// "Body/Unknown": generic body panel (fender, quarter panel)
    BodyUnknown,
    Hood,
    Bumper,
    WindShield,
    /// No confident detection
    Unknown,
    /// Label outside the known vocabulary, kept verbatim
    Other(String),
}

impl Part {
    /// Known parts, in the part classifier's class order
    pub const KNOWN: [Part; 8] = [
        Part::Door,
        Part::Window,
        Part::Headlight,
        Part::Mirror,
        Part::BodyUnknown,
        Part::Hood,
        Part::Bumper,
        Part::WindShield,
    ];

    /// Display label, also used as the cost table key
    pub fn label(&self) -> &str {
        match self {
            Part::Door => "Door",
            Part::Window => "Window",
            Part::Headlight => "Headlight",
            Part::Mirror => "Mirror",
            Part::BodyUnknown => "Body/Unknown",
            Part::Hood => "Hood",
            Part::Bumper => "Bumper",
            Part::WindShield => "Wind Shield",
            Part::Unknown => "Unknown",
            Part::Other(label) => label,
        }
    }

    /// Parse a classifier label. Never fails: unrecognised labels become `Other`.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        let lower = trimmed.to_lowercase();
        match lower.as_str() {
            "door" => Part::Door,
            "window" => Part::Window,
            "headlight" => Part::Headlight,
            "mirror" => Part::Mirror,
            "body/unknown" => Part::BodyUnknown,
            "hood" => Part::Hood,
            "bumper" => Part::Bumper,
            "wind shield" | "windshield" => Part::WindShield,
            "unknown" | "" => Part::Unknown,
            _ => Part::Other(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Part {
    fn from(label: String) -> Self {
        Part::from_label(&label)
    }
}

impl From<Part> for String {
    fn from(part: Part) -> Self {
        part.label().to_string()
    }
}

/// Damage magnitude bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    /// Severity classes in classifier index order
    pub const ALL: [Severity; 3] = [Severity::Minor, Severity::Moderate, Severity::Severe];

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Minor => "Minor",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "minor" => Ok(Severity::Minor),
            "moderate" => Ok(Severity::Moderate),
            "severe" => Ok(Severity::Severe),
            _ => Err(Error::UnknownSeverity(s.to_string())),
        }
    }
}

/// Vehicle identity: make/model from the classifier, year from the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub make: String,
    pub model: String,
    pub year: String,
}

impl VehicleInfo {
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year: year.into(),
        }
    }

    /// "2020 Honda Accord"
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

/// Validate a vehicle year: exactly four ASCII digits
pub fn validate_year(year: &str) -> Result<String> {
    let year = year.trim();
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        Ok(year.to_string())
    } else {
        Err(Error::InvalidYear(year.to_string()))
    }
}
