//! Scatter of GDP (PPP) per capita against the World Bank tariff rate.
//!
//! Data-dependent layout (ranges, labels, annotation text) is computed up front
//! in plain functions; `render_chart` only draws. Hand-drawn strokes are
//! computed in backend pixels so the wobble is isotropic.

use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::config::Settings;
use crate::domain::MergedRecord;
use crate::error::{AppError, ErrorKind};
use crate::math::TrendSummary;
use crate::plot::font::{FONT_FAMILY, ensure_chart_font};
use crate::plot::sketch::{Sketch, dash_segments};

pub const TITLE: &str = "Do Higher Tariffs = Lower GDP?";
pub const X_LABEL: &str = "Tariff Rate (%)";
pub const Y_LABEL: &str = "GDP per Capita (PPP, $)";

/// Countries above either threshold get a name label.
pub const OUTLIER_GDP_PPP: f64 = 80_000.0;
pub const OUTLIER_WB_RATE: f64 = 15.0;

/// Axes-fraction anchor of the statistics text.
const STATS_ANCHOR: (f64, f64) = (0.8, 0.95);

const POINT_COLOR: RGBColor = RGBColor(31, 119, 180);

#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Pixels: 12 x 8 inches at `dpi`.
    pub size: (u32, u32),
    pub dpi: f64,
    /// `None` draws straight lines.
    pub sketch: Option<Sketch>,
    pub seed: u64,
    pub font_path: Option<std::path::PathBuf>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        let dpi = 300.0;
        Self {
            size: ((12.0 * dpi) as u32, (8.0 * dpi) as u32),
            dpi,
            sketch: Some(Sketch::hand_drawn(dpi)),
            seed: 42,
            font_path: None,
        }
    }
}

impl ChartOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            seed: settings.sketch_seed,
            font_path: settings.font_path.clone(),
            ..Self::default()
        }
    }

    /// Typographic points to pixels.
    fn px(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }
}

pub fn is_outlier(row: &MergedRecord) -> bool {
    row.gdp_ppp > OUTLIER_GDP_PPP || row.wb_rate > OUTLIER_WB_RATE
}

/// Data range widened by 5% each side; a zero-width range is widened by ±1.
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !lo.is_finite() {
        return 0.0..1.0;
    }
    if hi - lo <= f64::EPSILON * lo.abs().max(1.0) {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

/// `x.xx` or `n/a`.
pub fn format_stat(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "n/a".to_string(),
    }
}

pub fn stats_lines(trend: &TrendSummary) -> [String; 2] {
    [
        format!("Correlation: {}", format_stat(trend.correlation, 2)),
        format!("R²: {}", format_stat(trend.r_squared, 2)),
    ]
}

/// Render the chart to `path` as PNG.
pub fn render_chart(
    path: &Path,
    rows: &[MergedRecord],
    trend: &TrendSummary,
    opts: &ChartOptions,
) -> Result<(), AppError> {
    ensure_chart_font(opts.font_path.as_deref())?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::new(ErrorKind::Io, format!("Failed to create '{}': {e}", parent.display()))
        })?;
    }

    draw(path, rows, trend, opts)
        .map_err(|e| AppError::new(ErrorKind::Render, format!("Failed to render '{}': {e}", path.display())))?;

    info!(path = %path.display(), points = rows.len(), "wrote chart");
    Ok(())
}

fn draw(
    path: &Path,
    rows: &[MergedRecord],
    trend: &TrendSummary,
    opts: &ChartOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let line_width = opts.px(2.0).round() as u32;

    let root = BitMapBackend::new(path, opts.size).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = padded_range(rows.iter().map(|r| r.wb_rate));
    let y_range = padded_range(rows.iter().map(|r| r.gdp_ppp));

    let font = |points: f64| FontDesc::new(FontFamily::Name(FONT_FAMILY), opts.px(points), FontStyle::Normal);

    let mut chart = ChartBuilder::on(&root)
        .margin(opts.px(12.0) as u32)
        .caption(TITLE, font(14.0).color(&BLACK))
        .set_label_area_size(LabelAreaPosition::Left, opts.px(60.0) as u32)
        .set_label_area_size(LabelAreaPosition::Bottom, opts.px(36.0) as u32)
        .build_cartesian_2d(x_range.clone(), y_range)?;

    // Straight axes are hidden; the sketched frame below replaces them.
    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .axis_desc_style(font(12.0).color(&BLACK))
        .label_style(font(10.0).color(&BLACK))
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .max_light_lines(0)
        .bold_line_style(BLACK.mix(0.3).stroke_width((line_width / 2).max(1)))
        .axis_style(TRANSPARENT.stroke_width(1))
        .draw()?;

    let marker = opts.px(3.0).round() as i32;
    chart.draw_series(
        rows.iter()
            .map(|r| Circle::new((r.wb_rate, r.gdp_ppp), marker, POINT_COLOR.mix(0.6).filled())),
    )?;

    let label_font = font(8.0).color(&BLACK).pos(Pos::new(HPos::Left, VPos::Bottom));
    let offset = opts.px(5.0).round() as i32;
    chart.draw_series(rows.iter().filter(|r| is_outlier(r)).map(|r| {
        EmptyElement::at((r.wb_rate, r.gdp_ppp)) + Text::new(r.country.clone(), (offset, -offset), label_font.clone())
    }))?;

    // Regression line, dashed, over the observed tariff range.
    let (x_min, x_max) = rows
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| (lo.min(r.wb_rate), hi.max(r.wb_rate)));
    if x_min.is_finite() && x_max > x_min {
        let ends = [
            to_f64(chart.backend_coord(&(x_min, trend.fit.predict(x_min)))),
            to_f64(chart.backend_coord(&(x_max, trend.fit.predict(x_max)))),
        ];
        let line = sketched(&ends, opts.sketch, &mut rng);
        let style = RED.mix(0.8).stroke_width(line_width);
        for dash in dash_segments(&line, 3.7 * f64::from(line_width), 1.6 * f64::from(line_width)) {
            root.draw(&PathElement::new(to_i32(&dash), style))?;
        }
    }

    // Plot frame.
    let (xs, ys) = chart.plotting_area().get_pixel_range();
    let (left, right) = (f64::from(xs.start), f64::from(xs.end));
    let (top, bottom) = (f64::from(ys.start), f64::from(ys.end));
    let frame = [(left, top), (right, top), (right, bottom), (left, bottom), (left, top)];
    root.draw(&PathElement::new(
        to_i32(&sketched(&frame, opts.sketch, &mut rng)),
        BLACK.stroke_width(line_width),
    ))?;

    // Statistics text at axes fraction, first baseline at the anchor.
    let stats_font = font(10.0).color(&BLACK).pos(Pos::new(HPos::Left, VPos::Bottom));
    let sx = left + STATS_ANCHOR.0 * (right - left);
    let sy = bottom - STATS_ANCHOR.1 * (bottom - top);
    let line_height = opts.px(10.0) * 1.2;
    for (i, text) in stats_lines(trend).into_iter().enumerate() {
        let y = sy + line_height * i as f64;
        root.draw(&Text::new(text, (sx.round() as i32, y.round() as i32), stats_font.clone()))?;
    }

    root.present()?;
    Ok(())
}

fn sketched(path: &[(f64, f64)], sketch: Option<Sketch>, rng: &mut StdRng) -> Vec<(f64, f64)> {
    match sketch {
        Some(s) => s.apply(path, rng),
        None => path.to_vec(),
    }
}

fn to_f64((x, y): (i32, i32)) -> (f64, f64) {
    (f64::from(x), f64::from(y))
}

fn to_i32(path: &[(f64, f64)]) -> Vec<(i32, i32)> {
    path.iter().map(|&(x, y)| (x.round() as i32, y.round() as i32)).collect()
}
