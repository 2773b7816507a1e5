//! Terminal output for the three stages.
//!
//! Formatting lives here so the extract/merge code only returns data.

use crate::domain::{CleanStats, Extraction, GdpRecord, MergedRecord, TariffRecord};
use crate::math::TrendSummary;
use crate::merge::MergeOutput;
use crate::plot::format_stat;
use crate::report::Rankings;

/// Rows shown by the extractor summaries.
pub const HEAD_ROWS: usize = 5;
/// Rows in each ranking table of the plot summary.
pub const TOP_N: usize = 5;

pub fn format_tariff_summary(extraction: &Extraction<TariffRecord>) -> String {
    let mut out = String::new();
    out.push_str("Successfully extracted tariff data!\n");
    out.push_str("\nFirst few rows of the data:\n");
    out.push_str(&format_tariff_table(&extraction.records[..extraction.records.len().min(HEAD_ROWS)]));
    out.push_str(&format!(
        "\nTotal number of countries/regions: {}\n",
        extraction.records.len()
    ));
    out.push_str(&format_clean_stats(&extraction.stats));
    out
}

pub fn format_gdp_summary(extraction: &Extraction<GdpRecord>) -> String {
    let mut out = String::new();
    out.push_str("Successfully extracted GDP (PPP) per capita data!\n");
    out.push_str("\nFirst few rows of the data:\n");
    out.push_str(&format_gdp_table(&extraction.records[..extraction.records.len().min(HEAD_ROWS)]));
    out.push_str(&format!(
        "\nTotal number of countries/territories: {}\n",
        extraction.records.len()
    ));
    out.push_str(&format_clean_stats(&extraction.stats));
    out
}

pub fn format_clean_stats(stats: &CleanStats) -> String {
    format!(
        "Cleaning: {} rows read, {} note rows dropped, {} blank rows dropped, {} cells coerced to missing\n",
        stats.rows_in, stats.rows_dropped_notes, stats.rows_dropped_blank, stats.cells_coerced_missing
    )
}

/// Row count, correlation and the two top-N tables.
pub fn format_plot_summary(merge: &MergeOutput, trend: &TrendSummary, rankings: &Rankings) -> String {
    let mut out = String::new();
    out.push_str(&format!("Number of countries in analysis: {}\n", merge.rows.len()));
    out.push_str(&format!(
        "\nCorrelation coefficient: {}\n",
        format_stat(trend.correlation, 3)
    ));

    out.push_str(&format!("\nTop {TOP_N} countries by GDP (PPP) per capita:\n"));
    out.push_str(&format_merged_table(&rankings.by_gdp));

    out.push_str(&format!("\nTop {TOP_N} countries by Tariff Rate:\n"));
    out.push_str(&format_merged_table(&rankings.by_tariff));

    if !merge.unmatched_tariff.is_empty() || !merge.unmatched_gdp.is_empty() {
        out.push_str(&format!(
            "\nUnmatched names: {} tariff-only, {} GDP-only (exact-name join)\n",
            merge.unmatched_tariff.len(),
            merge.unmatched_gdp.len()
        ));
    }
    out
}

pub fn format_tariff_table(rows: &[TariffRecord]) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        format!(
            "{:>3} {:<28} {:>8} {:>8} {:>8} {:>8} {:>11} {:>11}",
            "", "Country", "WB_Rate", "WB_Year", "WTO_Rate", "WTO_Year", "UNCTAD_Rate", "UNCTAD_Year"
        ),
    );
    for (i, r) in rows.iter().enumerate() {
        push_line(
            &mut out,
            format!(
                "{:>3} {:<28} {:>8} {:>8} {:>8} {:>8} {:>11} {:>11}",
                i,
                truncate(&r.country, 28),
                fmt_opt(r.wb_rate),
                truncate(&r.wb_year, 8),
                fmt_opt(r.wto_rate),
                truncate(&r.wto_year, 8),
                fmt_opt(r.unctad_rate),
                truncate(&r.unctad_year, 11),
            ),
        );
    }
    out
}

pub fn format_gdp_table(rows: &[GdpRecord]) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        format!(
            "{:>3} {:<28} {:>10} {:>8} {:>16} {:>15} {:>10} {:>8}",
            "", "Country", "IMF_Value", "IMF_Year", "World_Bank_Value", "World_Bank_Year", "CIA_Value", "CIA_Year"
        ),
    );
    for (i, r) in rows.iter().enumerate() {
        push_line(
            &mut out,
            format!(
                "{:>3} {:<28} {:>10} {:>8} {:>16} {:>15} {:>10} {:>8}",
                i,
                truncate(&r.country, 28),
                fmt_opt(r.imf_value),
                truncate(&r.imf_year, 8),
                fmt_opt(r.world_bank_value),
                truncate(&r.world_bank_year, 15),
                fmt_opt(r.cia_value),
                truncate(&r.cia_year, 8),
            ),
        );
    }
    out
}

pub fn format_merged_table(rows: &[MergedRecord]) -> String {
    let mut out = String::new();
    push_line(&mut out, format!("{:<28} {:>12} {:>8}", "Country", "GDP_PPP", "WB_Rate"));
    for r in rows {
        push_line(
            &mut out,
            format!(
                "{:<28} {:>12} {:>8}",
                truncate(&r.country, 28),
                fmt_float(r.gdp_ppp),
                fmt_float(r.wb_rate)
            ),
        );
    }
    out
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Whole numbers keep one decimal (`5.0`), like the CSV files.
fn fmt_float(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(fmt_float).unwrap_or_else(|| "NaN".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{LinearFit, TrendSummary};

    fn tariff(country: &str, wb_rate: Option<f64>) -> TariffRecord {
        TariffRecord {
            country: country.to_string(),
            wb_rate,
            wb_year: "2020".to_string(),
            wto_rate: None,
            wto_year: String::new(),
            unctad_rate: Some(4.25),
            unctad_year: "2021".to_string(),
        }
    }

    fn merged(country: &str, wb_rate: f64, gdp_ppp: f64) -> MergedRecord {
        MergedRecord {
            country: country.to_string(),
            gdp_ppp,
            wb_rate,
        }
    }

    #[test]
    fn tariff_summary_shows_head_and_total() {
        let records: Vec<TariffRecord> = (0..7).map(|i| tariff(&format!("Country{i}"), Some(i as f64))).collect();
        let extraction = Extraction {
            records,
            stats: CleanStats { rows_in: 9, rows_dropped_notes: 2, ..CleanStats::default() },
        };
        let text = format_tariff_summary(&extraction);

        assert!(text.starts_with("Successfully extracted tariff data!\n"));
        assert!(text.contains("Country4"));
        assert!(!text.contains("Country5"));
        assert!(text.contains("Total number of countries/regions: 7"));
        assert!(text.contains("2 note rows dropped"));
    }

    #[test]
    fn missing_values_render_as_nan() {
        let table = format_tariff_table(&[tariff("Testland", None)]);
        let row = table.lines().nth(1).unwrap();
        assert!(row.contains("Testland"));
        assert!(row.contains("NaN"));
        assert!(row.contains("4.25"));
    }

    #[test]
    fn plot_summary_lists_counts_and_tops() {
        let rows = vec![merged("Richland", 1.5, 115_000.0), merged("Testland", 5.0, 10_000.0)];
        let merge = MergeOutput {
            rows: rows.clone(),
            unmatched_gdp: vec!["Elsewhere".to_string()],
            ..MergeOutput::default()
        };
        let trend = TrendSummary {
            n: 2,
            fit: LinearFit { intercept: 0.0, slope: 0.0 },
            correlation: Some(-1.0),
            r_squared: Some(1.0),
        };
        let rankings = crate::report::rank_top(&rows, 5);
        let text = format_plot_summary(&merge, &trend, &rankings);

        assert!(text.starts_with("Number of countries in analysis: 2\n"));
        assert!(text.contains("Correlation coefficient: -1.000"));
        assert!(text.contains("Top 5 countries by GDP (PPP) per capita:"));
        let testland: Vec<&str> = text
            .lines()
            .find(|l| l.starts_with("Testland"))
            .unwrap()
            .split_whitespace()
            .collect();
        assert_eq!(testland, ["Testland", "10000.0", "5.0"]);
        assert!(text.contains("0 tariff-only, 1 GDP-only"));
    }

    #[test]
    fn truncate_marks_cut_names() {
        assert_eq!(truncate("Saint Vincent and the Grenadines", 10), "Saint Vin.");
        assert_eq!(truncate("Chad", 10), "Chad");
    }
}
