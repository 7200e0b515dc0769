//! AutoClaim - vehicle damage assessment from photos
//!
//! A CLI tool that classifies damage in photos of a vehicle, estimates repair
//! cost and writes claim reports plus a parts shopping guide.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for reports and JSON output.
/// `RUST_LOG` wins over `-v`; `LOG_FORMAT=json` switches to structured lines.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "autoclaim=debug" } else { "autoclaim=info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_writer(std::io::stderr)
                        .with_target(false),
                )
                .init();
        }
    }
}
