//! The three stages as plain functions over a `TableSource` and `Settings`.
//!
//! Binaries and the `tgdp` front-end share these; tests drive them with a
//! `StaticPage` and a temporary output directory.

use crate::config::Settings;
use crate::data::TableSource;
use crate::domain::{Extraction, GdpRecord, TariffRecord};
use crate::error::{AppError, ErrorKind};
use crate::io::{load_gdp_records, load_tariff_records};
use crate::math::{TrendSummary, summarize_trend};
use crate::merge::{MergeOutput, merge};
use crate::plot::{ChartOptions, render_chart};
use crate::report::{Rankings, TOP_N, rank_top};

/// All computed outputs of a plot run.
#[derive(Debug, Clone)]
pub struct PlotOutput {
    pub merge: MergeOutput,
    pub trend: TrendSummary,
    pub rankings: Rankings,
}

pub fn run_tariff(source: &dyn TableSource, settings: &Settings) -> Result<Extraction<TariffRecord>, AppError> {
    crate::extract::tariff::extract(source, &settings.tariff_url, &settings.tariff_csv())
}

pub fn run_gdp(source: &dyn TableSource, settings: &Settings) -> Result<Extraction<GdpRecord>, AppError> {
    crate::extract::gdp::extract(source, &settings.gdp_url, &settings.gdp_csv())
}

/// Merge the two CSVs and compute statistics, without rendering.
pub fn analyze(settings: &Settings) -> Result<PlotOutput, AppError> {
    let gdp = load_gdp_records(&settings.gdp_csv())?;
    let tariff = load_tariff_records(&settings.tariff_csv())?;

    let merge = merge(&gdp, &tariff);
    if merge.rows.is_empty() {
        return Err(AppError::new(
            ErrorKind::Empty,
            "No country appears in both datasets with a GDP figure and a World Bank tariff rate.",
        ));
    }

    let trend = summarize_trend(&merge.rows)?;
    let rankings = rank_top(&merge.rows, TOP_N);

    Ok(PlotOutput {
        merge,
        trend,
        rankings,
    })
}

/// Render the chart for an `analyze` result into the output directory.
pub fn render(settings: &Settings, output: &PlotOutput) -> Result<(), AppError> {
    render_chart(
        &settings.chart_png(),
        &output.merge.rows,
        &output.trend,
        &ChartOptions::from_settings(settings),
    )
}

/// `analyze` then `render`.
pub fn run_plot(settings: &Settings) -> Result<PlotOutput, AppError> {
    let output = analyze(settings)?;
    render(settings, &output)?;
    Ok(output)
}
