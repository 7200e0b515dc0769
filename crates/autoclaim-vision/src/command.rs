//! Classifier backed by an external command
//!
//! The command is run once per image as `<command...> --image <path>` and must
//! print a JSON object on stdout: `{"make": .., "model": ..}` for the vehicle
//! classifier, `{"label": .., "confidence": ..}` for the label classifiers.

use std::path::Path;
use std::process::Command;

use serde::de::DeserializeOwned;
use tracing::debug;

use autoclaim_types::{Error, Result};

use crate::{extract_json_from_response, LabelClassifier, Prediction, VehicleClassifier, VehicleIdentity};

#[derive(Debug, Clone)]
pub struct CommandClassifier {
    name: String,
    program: String,
    args: Vec<String>,
}

impl CommandClassifier {
    /// Parse a command line such as `python classify.py --model part.h5`
    pub fn from_command_line(name: impl Into<String>, command_line: &str) -> Result<Self> {
        let name = name.into();
        let mut parts = shell_words::split(command_line)
            .map_err(|e| Error::Classifier(format!("{} command is invalid: {}", name, e)))?;
        if parts.is_empty() {
            return Err(Error::Classifier(format!("{} command is empty", name)));
        }
        let program = parts.remove(0);
        Ok(Self {
            name,
            program,
            args: parts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn run<T: DeserializeOwned>(&self, image_path: &Path) -> Result<T> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.arg("--image");
        cmd.arg(image_path);

        debug!(classifier = %self.name, program = %self.program, image = %image_path.display(), "running classifier");

        let output = cmd.output().map_err(|e| {
            Error::Classifier(format!("{} classifier failed to start: {}", self.name, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Classifier(format!(
                "{} classifier exited with {}: {}",
                self.name,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return Err(Error::Classifier(format!("{} classifier printed nothing", self.name)));
        }

        let json_str = extract_json_from_response(stdout.as_ref());
        serde_json::from_str(&json_str).map_err(|e| {
            let truncated: String = json_str.chars().take(200).collect();
            Error::Classifier(format!(
                "{} classifier output is not valid JSON: {} | raw: {}",
                self.name, e, truncated
            ))
        })
    }
}

impl VehicleClassifier for CommandClassifier {
    fn classify(&self, image_path: &Path) -> Result<VehicleIdentity> {
        self.run(image_path)
    }
}

impl LabelClassifier for CommandClassifier {
    fn classify(&self, image_path: &Path) -> Result<Prediction> {
        self.run(image_path)
    }
}
