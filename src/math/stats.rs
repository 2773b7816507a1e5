//! Trend statistics for the merged dataset: regression line and Pearson r.

use crate::domain::MergedRecord;
use crate::error::{AppError, ErrorKind};
use crate::math::ols::polyfit;

/// `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSummary {
    pub n: usize,
    /// GDP_PPP regressed on WB_Rate.
    pub fit: LinearFit,
    /// `None` when either series has zero variance.
    pub correlation: Option<f64>,
    pub r_squared: Option<f64>,
}

pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    let coeffs = polyfit(xs, ys, 1)?;
    Some(LinearFit {
        intercept: coeffs[0],
        slope: coeffs[1],
    })
}

/// Pearson correlation coefficient, clamped to [-1, 1] against rounding.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return None;
    }

    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let mean_y = ys.iter().sum::<f64>() / nf;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Regression of GDP_PPP on WB_Rate plus correlation, for the chart and report.
pub fn summarize_trend(rows: &[MergedRecord]) -> Result<TrendSummary, AppError> {
    let xs: Vec<f64> = rows.iter().map(|r| r.wb_rate).collect();
    let ys: Vec<f64> = rows.iter().map(|r| r.gdp_ppp).collect();

    if rows.len() < 2 {
        return Err(AppError::new(
            ErrorKind::Degenerate,
            format!("Need at least 2 merged countries for a trend line, have {}.", rows.len()),
        ));
    }
    if xs.iter().all(|&x| x == xs[0]) {
        return Err(AppError::new(
            ErrorKind::Degenerate,
            "All tariff rates are identical; the trend line is undefined.",
        ));
    }

    let fit = linear_fit(&xs, &ys)
        .ok_or_else(|| AppError::new(ErrorKind::Degenerate, "Least squares fit did not converge."))?;
    let correlation = pearson(&xs, &ys);

    Ok(TrendSummary {
        n: rows.len(),
        fit,
        correlation,
        r_squared: correlation.map(|r| r * r),
    })
}
