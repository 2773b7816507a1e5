//! Command-line parsing for the `tgdp` front-end.
//!
//! The single-purpose binaries take no arguments; only `tgdp` parses flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tgdp", version, about = "Tariff rates vs GDP (PPP) per capita, from Wikipedia tables")]
pub struct Cli {
    /// Directory for the CSV files and the chart (overrides TGDP_OUT_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Defaults to `all`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Extract the tariff table to tariff_rates.csv.
    Tariff,
    /// Extract the GDP (PPP) per capita table to gdp_ppp_per_capita.csv.
    Gdp,
    /// Merge both CSVs, print statistics and render gdp_vs_tariff.png.
    Plot,
    /// Run tariff, gdp and plot in order, stopping at the first failed extraction.
    All,
}
