//! CLI definition using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub use autoclaim_types::OutputFormat;

#[derive(Parser)]
#[command(name = "autoclaim")]
#[command(version)]
#[command(about = "Vehicle damage assessment: repair cost reports from photos")]
#[command(long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub assess: AssessArgs,

    /// Cost table TOML replacing the built-in tables
    #[arg(long, global = true)]
    pub tables: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Assess every image in a folder (the default command)
#[derive(Args, Debug, Default)]
pub struct AssessArgs {
    /// Folder of vehicle photos [default: ./input]
    pub folder: Option<PathBuf>,

    /// Vehicle model year (4 digits). Prompted for if not given.
    #[arg(long)]
    pub year: Option<String>,

    /// State for the labor rate (e.g. "New York"). Prompted for if not given.
    #[arg(long)]
    pub state: Option<String>,

    /// Include the parts shopping guide
    #[arg(long, overrides_with = "no_shopping")]
    pub shopping: bool,

    /// Skip the parts shopping guide
    #[arg(long, overrides_with = "shopping")]
    pub no_shopping: bool,

    /// Directory for report files. Uses config value if not specified.
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,
}

impl AssessArgs {
    /// `Some` when a shopping flag was given
    pub fn shopping_flag(&self) -> Option<bool> {
        match (self.shopping, self.no_shopping) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate the cost of a single damaged part
    Estimate {
        /// Part name (e.g. Door, Bumper, "Wind Shield")
        #[arg(long)]
        part: String,

        /// Minor, Moderate or Severe
        #[arg(long)]
        severity: String,

        /// Damage type (e.g. dent, scratch, crack)
        #[arg(long, default_value = "damage")]
        damage_type: String,

        /// State for the labor rate
        #[arg(long)]
        state: Option<String>,

        /// Vehicle year; with make and model, adds a shopping guide
        #[arg(long, requires_all = ["make", "model"])]
        year: Option<String>,

        #[arg(long)]
        make: Option<String>,

        #[arg(long)]
        model: Option<String>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set report output directory
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// Set cost table TOML path
        #[arg(long)]
        set_tables: Option<PathBuf>,

        /// Set vehicle classifier command
        #[arg(long)]
        set_vehicle_cmd: Option<String>,

        /// Set part classifier command
        #[arg(long)]
        set_part_cmd: Option<String>,

        /// Set damage type classifier command
        #[arg(long)]
        set_damage_cmd: Option<String>,

        /// Set severity classifier command
        #[arg(long)]
        set_severity_cmd: Option<String>,

        /// Set minimum part confidence (0.0-1.0)
        #[arg(long)]
        set_part_min_conf: Option<f64>,

        /// Set default state for labor rates
        #[arg(long)]
        set_state: Option<String>,

        /// Enable/disable shopping guides by default
        #[arg(long)]
        set_shopping: Option<bool>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
