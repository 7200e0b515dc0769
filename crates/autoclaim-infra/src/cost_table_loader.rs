//! Cost table loader from TOML
//!
//! The file has the same shape as the built-in tables:
//!
//! ```toml
//! [defaults]
//! labor_hours = 2.0
//! part_cost = 250.0
//!
//! [labor_rates]
//! NationalAverage = 140.0
//! New_York = 165.0
//!
//! [labor_hours.Door.Minor]
//! dent = 1.5
//! damage = 1.5
//!
//! [part_costs."Wind Shield"]
//! Minor = 150.0
//! ```

use std::fs;
use std::path::Path;

use tracing::info;

use autoclaim_domain::model::CostTables;
use autoclaim_types::{ConfigError, Error, Result};

pub struct CostTableLoader;

impl CostTableLoader {
    /// Load and validate cost tables from a TOML file
    pub fn load_from_file(path: &Path) -> Result<CostTables> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read cost table file {}: {}",
                path.display(),
                e
            )))
        })?;

        let tables = Self::load_from_str(&content)?;
        info!(
            path = %path.display(),
            states = tables.labor_rates.len(),
            parts = tables.part_costs.len(),
            "loaded cost tables"
        );
        Ok(tables)
    }

    /// Load and validate cost tables from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<CostTables> {
        let tables: CostTables = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse cost table TOML: {}",
                e
            )))
        })?;
        tables.validate()?;
        Ok(tables)
    }

    /// Load from `path` if given, else the built-in tables
    pub fn load_or_builtin(path: Option<&Path>) -> Result<CostTables> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(CostTables::builtin()),
        }
    }
}
