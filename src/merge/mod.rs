//! Join the tariff and GDP datasets on country name.
//!
//! The join is an exact string match after light trimming. Names spelled
//! differently by the two sources ("United States" / "United States of
//! America") do not match; they are reported in `MergeOutput::unmatched_*`
//! instead of being guessed at.

use std::collections::{HashMap, HashSet};

use tracing::{info, warn};

use crate::domain::{GdpRecord, MergedRecord, TariffRecord};

/// Aggregate rows in the tariff table that are not countries.
pub const EXCLUDED_COUNTRIES: [&str; 2] = ["WORLD", "European Union"];

#[derive(Debug, Clone, Default)]
pub struct MergeOutput {
    /// In GDP-table order.
    pub rows: Vec<MergedRecord>,
    /// Tariff countries (after exclusion) with no GDP row.
    pub unmatched_tariff: Vec<String>,
    /// GDP countries with no tariff row.
    pub unmatched_gdp: Vec<String>,
    /// Joined rows dropped for lacking GDP_PPP or WB_Rate.
    pub dropped_missing: usize,
    /// Rows ignored because an earlier row had the same country.
    pub duplicate_keys: usize,
}

/// Strip footnote asterisks and surrounding whitespace from a GDP country name.
pub fn clean_gdp_country(name: &str) -> String {
    name.replace('*', "").trim().to_string()
}

pub fn clean_tariff_country(name: &str) -> String {
    name.trim().to_string()
}

pub fn is_excluded(country: &str) -> bool {
    EXCLUDED_COUNTRIES.contains(&country)
}

/// Inner-join on cleaned country name; first occurrence wins for repeated names.
pub fn merge(gdp: &[GdpRecord], tariff: &[TariffRecord]) -> MergeOutput {
    let mut out = MergeOutput::default();

    let mut tariff_by_country: HashMap<String, Option<f64>> = HashMap::new();
    let mut tariff_order: Vec<String> = Vec::new();
    for rec in tariff {
        let country = clean_tariff_country(&rec.country);
        if country.is_empty() || is_excluded(&country) {
            continue;
        }
        if tariff_by_country.contains_key(&country) {
            out.duplicate_keys += 1;
            continue;
        }
        tariff_by_country.insert(country.clone(), rec.wb_rate);
        tariff_order.push(country);
    }

    let mut seen_gdp: HashSet<String> = HashSet::new();
    for rec in gdp {
        let country = clean_gdp_country(&rec.country);
        if country.is_empty() {
            continue;
        }
        if !seen_gdp.insert(country.clone()) {
            out.duplicate_keys += 1;
            continue;
        }

        let Some(wb_rate) = tariff_by_country.get(&country) else {
            out.unmatched_gdp.push(country);
            continue;
        };

        match (rec.gdp_ppp(), *wb_rate) {
            (Some(gdp_ppp), Some(wb_rate)) => out.rows.push(MergedRecord {
                country,
                gdp_ppp,
                wb_rate,
            }),
            _ => out.dropped_missing += 1,
        }
    }

    out.unmatched_tariff = tariff_order
        .into_iter()
        .filter(|c| !seen_gdp.contains(c))
        .collect();

    if out.duplicate_keys > 0 {
        warn!(duplicates = out.duplicate_keys, "repeated country names; kept first occurrence");
    }
    if !out.unmatched_tariff.is_empty() || !out.unmatched_gdp.is_empty() {
        warn!(
            tariff_only = out.unmatched_tariff.len(),
            gdp_only = out.unmatched_gdp.len(),
            "countries without an exact-name match were left out"
        );
    }
    info!(
        merged = out.rows.len(),
        dropped_missing = out.dropped_missing,
        "merged datasets"
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tariff(country: &str, wb_rate: Option<f64>) -> TariffRecord {
        TariffRecord {
            country: country.to_string(),
            wb_rate,
            wb_year: String::new(),
            wto_rate: None,
            wto_year: String::new(),
            unctad_rate: None,
            unctad_year: String::new(),
        }
    }

    fn gdp(country: &str, imf: Option<f64>, cia: Option<f64>) -> GdpRecord {
        GdpRecord {
            country: country.to_string(),
            imf_value: imf,
            imf_year: String::new(),
            world_bank_value: None,
            world_bank_year: String::new(),
            cia_value: cia,
            cia_year: String::new(),
        }
    }

    #[test]
    fn joins_on_cleaned_names_and_derives_gdp_ppp() {
        let g = vec![
            gdp("Testland *", Some(10_000.0), None),
            gdp("Richland", Some(120_000.0), Some(115_000.0)),
        ];
        let t = vec![tariff(" Testland ", Some(5.0)), tariff("Richland", Some(1.5))];
        let out = merge(&g, &t);
        assert_eq!(
            out.rows,
            vec![
                MergedRecord { country: "Testland".into(), gdp_ppp: 10_000.0, wb_rate: 5.0 },
                MergedRecord { country: "Richland".into(), gdp_ppp: 115_000.0, wb_rate: 1.5 },
            ]
        );
    }

    #[test]
    fn aggregates_never_merge() {
        let g = vec![gdp("WORLD", Some(20_000.0), None), gdp("European Union", Some(50_000.0), None)];
        let t = vec![tariff("WORLD", Some(2.6)), tariff("European Union", Some(1.7))];
        let out = merge(&g, &t);
        assert!(out.rows.is_empty());
        assert_eq!(out.unmatched_gdp, vec!["WORLD", "European Union"]);
        assert!(out.unmatched_tariff.is_empty());
    }

    #[test]
    fn drops_rows_missing_either_metric() {
        let g = vec![gdp("A", None, None), gdp("B", Some(1.0), None)];
        let t = vec![tariff("A", Some(3.0)), tariff("B", None)];
        let out = merge(&g, &t);
        assert!(out.rows.is_empty());
        assert_eq!(out.dropped_missing, 2);
    }

    #[test]
    fn strict_inner_join_bounds() {
        let g = vec![
            gdp("A", Some(1.0), None),
            gdp("A", Some(2.0), None),
            gdp("B", Some(3.0), None),
            gdp("United States", Some(80_000.0), None),
        ];
        let t = vec![
            tariff("A", Some(1.0)),
            tariff("A", Some(9.0)),
            tariff("United States of America", Some(3.3)),
            tariff("WORLD", Some(2.0)),
        ];
        let out = merge(&g, &t);

        let tariff_kept = t.iter().filter(|r| !is_excluded(r.country.trim())).count();
        assert!(out.rows.len() <= tariff_kept.min(g.len()));
        for row in &out.rows {
            assert!(g.iter().any(|r| clean_gdp_country(&r.country) == row.country));
            assert!(t.iter().any(|r| clean_tariff_country(&r.country) == row.country));
        }
        assert_eq!(out.rows, vec![MergedRecord { country: "A".into(), gdp_ppp: 1.0, wb_rate: 1.0 }]);
        assert_eq!(out.duplicate_keys, 2);
        assert_eq!(out.unmatched_tariff, vec!["United States of America"]);
        assert_eq!(out.unmatched_gdp, vec!["B", "United States"]);
    }
}
