//! Reporting utilities: top-N rankings and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::MergedRecord;

/// Top-N merged rows by each metric, descending.
#[derive(Debug, Clone, Default)]
pub struct Rankings {
    pub by_gdp: Vec<MergedRecord>,
    pub by_tariff: Vec<MergedRecord>,
}

/// The `n` rows with the largest `key`, descending; ties keep input order.
pub fn top_n_by(rows: &[MergedRecord], n: usize, key: impl Fn(&MergedRecord) -> f64) -> Vec<MergedRecord> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(std::cmp::Ordering::Equal));
    sorted.truncate(n);
    sorted
}

pub fn rank_top(rows: &[MergedRecord], n: usize) -> Rankings {
    Rankings {
        by_gdp: top_n_by(rows, n, |r| r.gdp_ppp),
        by_tariff: top_n_by(rows, n, |r| r.wb_rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, wb_rate: f64, gdp_ppp: f64) -> MergedRecord {
        MergedRecord {
            country: country.to_string(),
            gdp_ppp,
            wb_rate,
        }
    }

    #[test]
    fn rank_top_basic() {
        let rows = vec![
            row("A", 2.0, 50_000.0),
            row("B", 12.0, 8_000.0),
            row("C", 5.0, 90_000.0),
        ];
        let rankings = rank_top(&rows, 2);
        let names = |v: &[MergedRecord]| v.iter().map(|r| r.country.clone()).collect::<Vec<_>>();
        assert_eq!(names(&rankings.by_gdp), ["C", "A"]);
        assert_eq!(names(&rankings.by_tariff), ["B", "C"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let rows = vec![row("First", 3.0, 1.0), row("Second", 3.0, 1.0), row("Third", 1.0, 1.0)];
        let top = top_n_by(&rows, 5, |r| r.wb_rate);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].country, "First");
        assert_eq!(top[1].country, "Second");
    }
}
