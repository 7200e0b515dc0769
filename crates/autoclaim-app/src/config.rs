//! Configuration management for autoclaim
//!
//! Config stored at: ~/.config/autoclaim/config.json

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use autoclaim_types::{ConfigError, OutputFormat, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory reports are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// TOML cost tables replacing the built-in ones
    #[serde(default)]
    pub cost_tables: Option<PathBuf>,

    /// Vehicle make/model classifier command
    #[serde(default)]
    pub vehicle_command: Option<String>,

    /// Damaged part classifier command
    #[serde(default)]
    pub part_command: Option<String>,

    /// Damage type classifier command
    #[serde(default)]
    pub damage_command: Option<String>,

    /// Severity classifier command
    #[serde(default)]
    pub severity_command: Option<String>,

    /// Part predictions below this confidence count as "Unknown"
    #[serde(default)]
    pub part_min_confidence: Option<f64>,

    /// State used when none is given on the command line
    #[serde(default)]
    pub default_state: Option<String>,

    /// Generate shopping guides unless told otherwise
    #[serde(default = "default_true")]
    pub include_shopping: bool,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            cost_tables: None,
            vehicle_command: None,
            part_command: None,
            damage_command: None,
            severity_command: None,
            part_min_confidence: None,
            default_state: None,
            include_shopping: true,
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("autoclaim");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let or_unset = |value: &Option<String>| value.clone().unwrap_or_else(|| "(not set)".to_string());

        writeln!(f, "AutoClaim Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(f, "Output dir:        {}", self.output_dir.display())?;
        writeln!(
            f,
            "Cost tables:       {}",
            self.cost_tables
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string())
        )?;
        writeln!(f, "Vehicle command:   {}", or_unset(&self.vehicle_command))?;
        writeln!(f, "Part command:      {}", or_unset(&self.part_command))?;
        writeln!(f, "Damage command:    {}", or_unset(&self.damage_command))?;
        writeln!(f, "Severity command:  {}", or_unset(&self.severity_command))?;
        writeln!(
            f,
            "Part min conf:     {}",
            self.part_min_confidence
                .map(|c| format!("{:.2}", c))
                .unwrap_or_else(|| "(none)".to_string())
        )?;
        writeln!(
            f,
            "Default state:     {}",
            self.default_state.as_deref().unwrap_or("(national average)")
        )?;
        writeln!(f, "Shopping guides:   {}", self.include_shopping)?;
        writeln!(f, "Output format:     {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:       {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"part_command": "python part.py"}"#).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
        assert!(config.include_shopping);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.part_command.as_deref(), Some("python part.py"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("autoclaim").join("config.json");

        let config = Config {
            vehicle_command: Some("python 'models/make model.py'".to_string()),
            part_min_confidence: Some(0.4),
            default_state: Some("New_York".to_string()),
            include_shopping: false,
            output_format: OutputFormat::Json,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
