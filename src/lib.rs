//! `tariff-gdp` library crate.
//!
//! The binaries (`tgdp`, `extract_tariff`, `extract_gdp`, `plot_against`) are
//! thin wrappers around this library so that:
//!
//! - the pipeline is testable without network access or spawning processes
//! - each stage can run on its own or chained
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod extract;
pub mod io;
pub mod math;
pub mod merge;
pub mod plot;
pub mod report;
