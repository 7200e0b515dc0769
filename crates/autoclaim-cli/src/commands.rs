//! Command handlers

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use autoclaim_app::app::{assess_images, AssessmentRequest};
use autoclaim_app::config::Config;
use autoclaim_app::repository::{load_cost_tables, open_classifiers, open_report_repo};
use autoclaim_app::scanner::find_images;
use autoclaim_domain::model::{ReportKind, ShoppingCatalog};
use autoclaim_domain::repository::ReportRepository;
use autoclaim_domain::service::{aggregate, build_guide, CostEstimator};
use autoclaim_types::{validate_year, Error, OutputFormat, Part, Result, Severity, VehicleInfo};

use crate::cli::{AssessArgs, Cli, Commands};
use crate::output::{output_estimate, output_summary};

const DEFAULT_INPUT_DIR: &str = "input";
const RULE: &str = "======================================================================";

pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);
    let tables_path = cli.tables.as_deref();

    match cli.command {
        Some(Commands::Estimate {
            ref part,
            ref severity,
            ref damage_type,
            ref state,
            ref year,
            ref make,
            ref model,
        }) => {
            let vehicle = match (year, make, model) {
                (Some(year), Some(make), Some(model)) => {
                    Some(VehicleInfo::new(make.as_str(), model.as_str(), validate_year(year)?))
                }
                _ => None,
            };
            cmd_estimate(
                &config,
                tables_path,
                output_format,
                part,
                severity,
                damage_type,
                state.as_deref().or(config.default_state.as_deref()),
                vehicle,
            )
        }
        Some(Commands::Config {
            show,
            ref set_output_dir,
            ref set_tables,
            ref set_vehicle_cmd,
            ref set_part_cmd,
            ref set_damage_cmd,
            ref set_severity_cmd,
            set_part_min_conf,
            ref set_state,
            set_shopping,
            set_output,
            reset,
        }) => cmd_config(
            show,
            ConfigUpdate {
                output_dir: set_output_dir.clone(),
                cost_tables: set_tables.clone(),
                vehicle_command: set_vehicle_cmd.clone(),
                part_command: set_part_cmd.clone(),
                damage_command: set_damage_cmd.clone(),
                severity_command: set_severity_cmd.clone(),
                part_min_confidence: set_part_min_conf,
                default_state: set_state.clone(),
                include_shopping: set_shopping,
                output_format: set_output,
            },
            reset,
        ),
        None => cmd_assess(&config, &cli.assess, tables_path, output_format),
    }
}

fn cmd_assess(
    config: &Config,
    args: &AssessArgs,
    tables_path: Option<&Path>,
    output_format: OutputFormat,
) -> Result<()> {
    let mut out = StatusStream::for_format(output_format).writer();
    print_banner(&mut out)?;

    let folder = match args.folder {
        Some(ref folder) => folder.clone(),
        None => {
            let folder = PathBuf::from(DEFAULT_INPUT_DIR);
            writeln!(out, "Using default input folder: {}", folder.display())?;
            writeln!(out, "Tip: Run 'autoclaim /path/to/folder' to use a different folder\n")?;
            folder
        }
    };

    // Everything that can fail without user input is checked before prompting
    let images = find_images(&folder)?;
    let year = args.year.as_deref().map(validate_year).transpose()?;
    let classifiers = open_classifiers(config)?;
    let tables = load_cost_tables(config, tables_path)?;
    let catalog = ShoppingCatalog::builtin();

    writeln!(out, "Found {} image(s) to process\n", images.len())?;
    info!(folder = %folder.display(), images = images.len(), "starting assessment");

    let mut input = io::stdin().lock();

    let year = match year {
        Some(year) => year,
        None => {
            print_section(&mut out, "VEHICLE INFORMATION")?;
            prompt_year(&mut input, &mut out)?
        }
    };

    let state = match args.state.clone().or_else(|| config.default_state.clone()) {
        Some(state) => Some(state),
        None => prompt_optional(
            &mut input,
            &mut out,
            "Enter your state (or press Enter for national average): ",
        )?,
    };

    let include_shopping = match args.shopping_flag() {
        Some(flag) => flag,
        None => {
            print_section(&mut out, "REPORT OPTIONS")?;
            writeln!(out, "Would you like to include a parts shopping guide?")?;
            writeln!(out, "This will provide price ranges and links to online retailers.")?;
            prompt_yes_no(&mut input, &mut out, "Include shopping guide?", config.include_shopping)?
        }
    };

    let request = AssessmentRequest::new(&year)?
        .with_state(state)
        .with_shopping(include_shopping);
    debug!(?request, "assessment request");

    print_section_banner(&mut out, "PROCESSING IMAGES")?;
    let outcome = assess_images(&images, &classifiers, &tables, &catalog, &request, true);

    for report in &outcome.reports {
        writeln!(
            out,
            "Complete - {}: {} ({})",
            file_name(Path::new(&report.image_path)),
            report.damaged_part.part,
            report.damaged_part.severity
        )?;
    }
    for failure in &outcome.failures {
        writeln!(out, "Skipped  - {}: {}", file_name(&failure.image_path), failure.error)?;
    }

    if outcome.reports.is_empty() {
        return Err(Error::NoReports(outcome.failures.len()));
    }

    print_section_banner(&mut out, "GENERATING REPORT")?;
    let aggregated = aggregate(&outcome.reports);
    out.flush()?;
    output_summary(output_format, &aggregated)?;

    print_section_banner(&mut out, "SAVING REPORTS")?;
    let repo = open_report_repo(config, args.output_dir.as_deref());
    let mut saved = Vec::new();
    for kind in ReportKind::ALL {
        if kind == ReportKind::ShoppingGuide && !include_shopping {
            continue;
        }
        if let Some(path) = repo.save(&aggregated, kind)? {
            writeln!(out, "{} saved to: {}", kind.label(), path.display())?;
            saved.push((kind, path));
        }
    }

    print_next_steps(&mut out, &saved)?;
    writeln!(out, "\nReport complete! Thank you for using AutoClaim.")?;
    writeln!(out, "{}\n", RULE)?;

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_estimate(
    config: &Config,
    tables_path: Option<&Path>,
    output_format: OutputFormat,
    part: &str,
    severity: &str,
    damage_type: &str,
    state: Option<&str>,
    vehicle: Option<VehicleInfo>,
) -> Result<()> {
    let tables = load_cost_tables(config, tables_path)?;
    let part = Part::from_label(part);
    let severity: Severity = severity.parse()?;
    let damage_type = damage_type.trim().to_lowercase();

    let estimate = CostEstimator::new(&tables).estimate(&part, severity, &damage_type, state);

    let guide = vehicle.map(|vehicle| {
        build_guide(
            &ShoppingCatalog::builtin(),
            &part,
            &estimate,
            &vehicle,
        )
    });

    output_estimate(output_format, &part, severity, &damage_type, &estimate, guide.as_ref())
}

/// Values given with `config --set-*`
struct ConfigUpdate {
    output_dir: Option<PathBuf>,
    cost_tables: Option<PathBuf>,
    vehicle_command: Option<String>,
    part_command: Option<String>,
    damage_command: Option<String>,
    severity_command: Option<String>,
    part_min_confidence: Option<f64>,
    default_state: Option<String>,
    include_shopping: Option<bool>,
    output_format: Option<OutputFormat>,
}

impl ConfigUpdate {
    /// Apply to `config`; returns whether anything changed
    fn apply(self, config: &mut Config) -> Result<bool> {
        let mut modified = false;

        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
            modified = true;
        }

        if let Some(path) = self.cost_tables {
            config.cost_tables = Some(path);
            modified = true;
        }

        for (slot, value) in [
            (&mut config.vehicle_command, self.vehicle_command),
            (&mut config.part_command, self.part_command),
            (&mut config.damage_command, self.damage_command),
            (&mut config.severity_command, self.severity_command),
        ] {
            if let Some(cmd) = value {
                *slot = Some(cmd);
                modified = true;
            }
        }

        if let Some(min_conf) = self.part_min_confidence {
            if !(0.0..=1.0).contains(&min_conf) {
                return Err(autoclaim_types::ConfigError::ParseError(format!(
                    "part confidence must be between 0.0 and 1.0, got {}",
                    min_conf
                ))
                .into());
            }
            config.part_min_confidence = Some(min_conf);
            modified = true;
        }

        if let Some(state) = self.default_state {
            config.default_state = Some(state.trim().replace(' ', "_")).filter(|s| !s.is_empty());
            modified = true;
        }

        if let Some(include_shopping) = self.include_shopping {
            config.include_shopping = include_shopping;
            modified = true;
        }

        if let Some(output_format) = self.output_format {
            config.output_format = output_format;
            modified = true;
        }

        Ok(modified)
    }
}

fn cmd_config(show: bool, update: ConfigUpdate, reset: bool) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let modified = update.apply(&mut config)?;

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

/// Where the narrative of an assessment run is written.
///
/// JSON mode keeps stdout for the summary document alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusStream {
    Stdout,
    Stderr,
}

impl StatusStream {
    fn for_format(output_format: OutputFormat) -> Self {
        match output_format {
            OutputFormat::Json => StatusStream::Stderr,
            OutputFormat::Table => StatusStream::Stdout,
        }
    }

    fn writer(self) -> Box<dyn Write> {
        match self {
            StatusStream::Stdout => Box::new(io::stdout()),
            StatusStream::Stderr => Box::new(io::stderr()),
        }
    }
}

fn print_banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "{}AUTO CLAIM", " ".repeat(30))?;
    writeln!(out, "{}Vehicle Damage Assessment", " ".repeat(22))?;
    writeln!(out, "{}\n", RULE)
}

fn print_section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(RULE.len()))
}

fn print_section_banner(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}\n", RULE)
}

fn print_next_steps(out: &mut impl Write, saved: &[(ReportKind, PathBuf)]) -> io::Result<()> {
    print_section_banner(out, "NEXT STEPS")?;
    writeln!(out, "1. Review the complete report and the parts and labor breakdowns:")?;
    for (kind, path) in saved {
        writeln!(out, "   - {}: {}", kind.label(), path.display())?;
    }
    writeln!(out, "2. Get quotes from at least two repair shops and compare them with the estimate.")?;
    writeln!(out, "3. Share the report with your insurance provider when filing a claim.")?;
    if saved.iter().any(|(kind, _)| *kind == ReportKind::ShoppingGuide) {
        writeln!(out, "4. Check the shopping guide for where to buy parts.")?;
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string()
}

fn read_answer(input: &mut impl BufRead, out: &mut impl Write, message: &str) -> Result<String> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
    }
    Ok(line.trim().to_string())
}

/// Ask until a valid 4-digit year is entered
fn prompt_year(input: &mut impl BufRead, out: &mut impl Write) -> Result<String> {
    loop {
        let answer = read_answer(input, out, "Enter the year of your vehicle: ")?;
        match validate_year(&answer) {
            Ok(year) => return Ok(year),
            Err(_) => writeln!(out, "Please enter a valid 4-digit year (e.g., 2020)")?,
        }
    }
}

/// Empty answer means `None`
fn prompt_optional(
    input: &mut impl BufRead,
    out: &mut impl Write,
    message: &str,
) -> Result<Option<String>> {
    let answer = read_answer(input, out, message)?;
    Ok(Some(answer).filter(|a| !a.is_empty()))
}

fn prompt_yes_no(
    input: &mut impl BufRead,
    out: &mut impl Write,
    question: &str,
    default: bool,
) -> Result<bool> {
    let hint = if default { "(Y/n)" } else { "(y/N)" };
    let answer = read_answer(input, out, &format!("{} {}: ", question, hint))?.to_lowercase();
    Ok(match answer.as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    })
}
