//! Top-level application orchestration.
//!
//! `src/main.rs` and the binaries under `src/bin/` are tiny; this module is the
//! "real main" that:
//! - initializes logging
//! - loads settings
//! - runs the requested stage(s)
//! - prints summaries

use std::io::Write;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::data::{PageClient, TableSource};
use crate::error::{AppError, ErrorKind};
use crate::report::{format_gdp_summary, format_plot_summary, format_tariff_summary};

pub mod pipeline;

/// Used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,tariff_gdp=info";

/// Log to stderr; stdout carries the summaries.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // A second init (tests, repeated calls) keeps the first subscriber.
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Entry point for the `tgdp` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();
    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    if let Some(dir) = &cli.out_dir {
        settings = settings.with_out_dir(dir);
    }

    let client = PageClient::new(&settings)?;
    dispatch(cli.command.unwrap_or(Command::All), &client, &settings)
}

/// Entry point for the single-stage binaries.
///
/// Failures are printed as `An error occurred: ...` on stdout and the process
/// still exits successfully.
pub fn run_component(command: Command) {
    init_logging();
    let result = Settings::from_env().and_then(|settings| {
        let client = PageClient::new(&settings)?;
        dispatch(command, &client, &settings)
    });
    if let Err(err) = result {
        println!("An error occurred: {err}");
    }
}

/// Run one stage (or all, in order) and print its summary to stdout.
pub fn dispatch(command: Command, source: &dyn TableSource, settings: &Settings) -> Result<(), AppError> {
    dispatch_to(command, source, settings, &mut std::io::stdout().lock())
}

/// `dispatch` with summaries written to `out`.
///
/// The plot summary is written before the chart is rendered, so a render
/// failure only loses the PNG.
pub fn dispatch_to(
    command: Command,
    source: &dyn TableSource,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    match command {
        Command::Tariff => {
            let extraction = pipeline::run_tariff(source, settings)?;
            emit(out, &format_tariff_summary(&extraction))?;
        }
        Command::Gdp => {
            let extraction = pipeline::run_gdp(source, settings)?;
            emit(out, &format_gdp_summary(&extraction))?;
        }
        Command::Plot => {
            let output = pipeline::analyze(settings)?;
            emit(out, &format_plot_summary(&output.merge, &output.trend, &output.rankings))?;
            pipeline::render(settings, &output)?;
        }
        Command::All => {
            for stage in [Command::Tariff, Command::Gdp, Command::Plot] {
                if let Err(err) = dispatch_to(stage, source, settings, out) {
                    error!(?stage, kind = ?err.kind(), "stage failed; later stages skipped");
                    return Err(err);
                }
            }
        }
    }
    Ok(())
}

fn emit(out: &mut dyn Write, text: &str) -> Result<(), AppError> {
    writeln!(out, "{text}")
        .and_then(|()| out.flush())
        .map_err(|e| AppError::new(ErrorKind::Io, format!("Failed to write summary: {e}")))
}
