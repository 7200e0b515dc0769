//! Adapters from configuration to tables, classifiers and persistence

use std::path::Path;

use autoclaim_domain::model::CostTables;
use autoclaim_infra::persistence::FileReportRepository;
use autoclaim_infra::CostTableLoader;
use autoclaim_types::{ConfigError, Result};
use autoclaim_vision::{ClassifierSet, CommandClassifier};

use crate::config::Config;

/// Open file-based report repository under `output_dir`, or the configured one
pub fn open_report_repo(config: &Config, output_dir: Option<&Path>) -> FileReportRepository {
    FileReportRepository::new(output_dir.unwrap_or(config.output_dir.as_path()))
}

/// Cost tables from `override_path`, the configured file, or the built-in data
pub fn load_cost_tables(config: &Config, override_path: Option<&Path>) -> Result<CostTables> {
    CostTableLoader::load_or_builtin(override_path.or(config.cost_tables.as_deref()))
}

/// Build the classifier set from the configured commands
pub fn open_classifiers(config: &Config) -> Result<ClassifierSet> {
    let vehicle = command_classifier("vehicle", config.vehicle_command.as_deref())?;
    let part = command_classifier("part", config.part_command.as_deref())?;
    let damage = command_classifier("damage", config.damage_command.as_deref())?;
    let severity = command_classifier("severity", config.severity_command.as_deref())?;

    Ok(ClassifierSet::new(
        Box::new(vehicle),
        Box::new(part),
        Box::new(damage),
        Box::new(severity),
    )
    .with_part_min_confidence(config.part_min_confidence))
}

fn command_classifier(name: &'static str, command: Option<&str>) -> Result<CommandClassifier> {
    match command {
        Some(cmd) if !cmd.trim().is_empty() => CommandClassifier::from_command_line(name, cmd),
        _ => Err(ConfigError::MissingClassifier(name).into()),
    }
}
