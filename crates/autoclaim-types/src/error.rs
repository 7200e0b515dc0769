//! Error types for autoclaim

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("No command configured for the {0} classifier")]
    MissingClassifier(&'static str),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid image format: {0}")]
    InvalidImageFormat(String),

    #[error("No image files found in {0} (supported: .jpg, .jpeg, .png, .bmp)")]
    NoImages(String),

    #[error("No reports generated successfully ({0} image(s) failed)")]
    NoReports(usize),

    #[error("Invalid year '{0}': expected a 4-digit year such as 2020")]
    InvalidYear(String),

    #[error("Unknown severity label: {0}")]
    UnknownSeverity(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Failed to persist report: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, Error>;
