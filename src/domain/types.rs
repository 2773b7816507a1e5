//! Shared domain types.
//!
//! The record types derive `Serialize` with the exact CSV column names. Reading
//! back goes through `io::ingest`, which coerces every cell again.

use serde::Serialize;

/// One HTML table as fetched: textual cells, no typing.
///
/// `columns[i]` is the header path of column `i`, one label per header row
/// (a two-row header such as `World Bank` / `Year` yields a path of length 2).
/// Body rows are padded to the same width as the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub columns: Vec<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_count(&self) -> usize {
        self.columns
            .len()
            .max(self.rows.iter().map(Vec::len).max().unwrap_or(0))
    }

    pub fn header_path(&self, col: usize) -> &[String] {
        self.columns.get(col).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every header label joined into one string, for substring selection.
    pub fn header_text(&self) -> String {
        self.columns
            .iter()
            .map(|path| path.join(" / "))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// One row of `tariff_rates.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TariffRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "WB_Rate")]
    pub wb_rate: Option<f64>,
    #[serde(rename = "WB_Year")]
    pub wb_year: String,
    #[serde(rename = "WTO_Rate")]
    pub wto_rate: Option<f64>,
    #[serde(rename = "WTO_Year")]
    pub wto_year: String,
    #[serde(rename = "UNCTAD_Rate")]
    pub unctad_rate: Option<f64>,
    #[serde(rename = "UNCTAD_Year")]
    pub unctad_year: String,
}

pub const TARIFF_HEADER: [&str; 7] = [
    "Country",
    "WB_Rate",
    "WB_Year",
    "WTO_Rate",
    "WTO_Year",
    "UNCTAD_Rate",
    "UNCTAD_Year",
];

/// One row of `gdp_ppp_per_capita.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GdpRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "IMF_Value")]
    pub imf_value: Option<f64>,
    #[serde(rename = "IMF_Year")]
    pub imf_year: String,
    #[serde(rename = "World_Bank_Value")]
    pub world_bank_value: Option<f64>,
    #[serde(rename = "World_Bank_Year")]
    pub world_bank_year: String,
    #[serde(rename = "CIA_Value")]
    pub cia_value: Option<f64>,
    #[serde(rename = "CIA_Year")]
    pub cia_year: String,
}

pub const GDP_HEADER: [&str; 7] = [
    "Country",
    "IMF_Value",
    "IMF_Year",
    "World_Bank_Value",
    "World_Bank_Year",
    "CIA_Value",
    "CIA_Year",
];

impl GdpRecord {
    /// CIA figure when present, IMF otherwise.
    pub fn gdp_ppp(&self) -> Option<f64> {
        self.cia_value.or(self.imf_value)
    }
}

/// A country present in both datasets with both metrics known.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    pub country: String,
    pub gdp_ppp: f64,
    pub wb_rate: f64,
}

/// Row/cell accounting for one extraction, so silent loss becomes visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub rows_in: usize,
    pub rows_dropped_notes: usize,
    pub rows_dropped_blank: usize,
    /// Non-empty numeric cells that could not be parsed and became missing.
    pub cells_coerced_missing: usize,
}

#[derive(Debug, Clone)]
pub struct Extraction<R> {
    pub records: Vec<R>,
    pub stats: CleanStats,
}
