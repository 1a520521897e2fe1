use std::process;

use anyhow::{Context, Result};
use chrono::{FixedOffset, Local};
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use trips_cli::commands::report;
use trips_cli::{Cli, Config};
use trips_core::ParseError;

/// A usage problem or any other fatal error.
const EXIT_FAILURE: i32 = 1;
/// The input file does not exist.
const EXIT_MISSING_FILE: i32 = 2;
/// The walk hit a timeline object shape it cannot process.
const EXIT_UNKNOWN_ENTRY: i32 = 3;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not failures; everything else is a
            // bad invocation and exits 1 after showing usage.
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_FAILURE,
            };
            let _ = err.print();
            process::exit(code);
        }
    };

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    if !cli.file.exists() {
        eprintln!("Error: {} does not exist", cli.file.display());
        process::exit(EXIT_MISSING_FILE);
    }

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        process::exit(exit_code(&err));
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let policy_kind = cli.policy.unwrap_or(config.policy);
    let date = cli.date.unwrap_or(config.date);
    let output = cli.output.clone().unwrap_or(config.output);
    let display_offset = resolve_offset(cli.utc_offset, config.utc_offset.as_deref())?;
    tracing::debug!(?policy_kind, %date, %display_offset, "resolved run options");

    report::run(
        &cli.file,
        policy_kind.into_policy(date),
        display_offset,
        &output,
    )
}

/// Picks the display offset: flag, then config, then the local offset
/// sampled once at startup.
fn resolve_offset(
    flag: Option<FixedOffset>,
    configured: Option<&str>,
) -> Result<FixedOffset> {
    if let Some(offset) = flag {
        return Ok(offset);
    }
    match configured {
        Some(value) => value
            .parse()
            .with_context(|| format!("invalid utc_offset in configuration: {value}")),
        None => Ok(*Local::now().offset()),
    }
}

/// Maps a run failure to its documented exit code.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ParseError>() {
        Some(
            ParseError::UnknownEntryKind { .. }
            | ParseError::EmptyEntry
            | ParseError::AmbiguousEntry,
        ) => EXIT_UNKNOWN_ENTRY,
        _ => EXIT_FAILURE,
    }
}
