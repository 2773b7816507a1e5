//! Read the extractor CSVs back for the merge stage.
//!
//! Every cell is read as text and numeric columns are coerced again. Only the
//! columns the merge needs are required.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use tracing::warn;

use crate::domain::{GdpRecord, TariffRecord};
use crate::error::{AppError, ErrorKind};
use crate::extract::clean::coerce_number;

/// A CSV file as text: raw records plus a header-name index.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub rows: Vec<StringRecord>,
    header_map: HashMap<String, usize>,
}

impl CsvTable {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header_map.get(name).copied()
    }

    fn require(&self, name: &str, path: &Path) -> Result<usize, AppError> {
        self.column(name).ok_or_else(|| {
            AppError::new(
                ErrorKind::MissingColumns,
                format!("Missing required column `{name}` in '{}'", path.display()),
            )
        })
    }
}

pub fn read_csv(path: &Path) -> Result<CsvTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(ErrorKind::Io, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let header_map = reader
        .headers()
        .map_err(|e| AppError::new(ErrorKind::Csv, format!("Failed to read CSV headers: {e}")))?
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        match result {
            Ok(record) => rows.push(record),
            // +2: 1-based lines, header on line 1.
            Err(e) => warn!(line = idx + 2, path = %path.display(), "skipping unreadable CSV row: {e}"),
        }
    }

    Ok(CsvTable {
        rows,
        header_map,
    })
}

fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn text(record: &StringRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| record.get(i)).unwrap_or("").to_string()
}

fn number(record: &StringRecord, idx: Option<usize>, strip: &[char]) -> Option<f64> {
    idx.and_then(|i| record.get(i))
        .and_then(|raw| coerce_number(raw, strip))
}

/// Load `tariff_rates.csv`. `Country` and `WB_Rate` are required.
pub fn load_tariff_records(path: &Path) -> Result<Vec<TariffRecord>, AppError> {
    let table = read_csv(path)?;
    let country = table.require("Country", path)?;
    let wb_rate = table.require("WB_Rate", path)?;
    let col = |name: &str| table.column(name);

    Ok(table
        .rows
        .iter()
        .map(|r| TariffRecord {
            country: text(r, Some(country)),
            wb_rate: number(r, Some(wb_rate), &['%']),
            wb_year: text(r, col("WB_Year")),
            wto_rate: number(r, col("WTO_Rate"), &['%']),
            wto_year: text(r, col("WTO_Year")),
            unctad_rate: number(r, col("UNCTAD_Rate"), &['%']),
            unctad_year: text(r, col("UNCTAD_Year")),
        })
        .collect())
}

/// Load `gdp_ppp_per_capita.csv`. `Country`, `IMF_Value` and `CIA_Value` are required.
pub fn load_gdp_records(path: &Path) -> Result<Vec<GdpRecord>, AppError> {
    let table = read_csv(path)?;
    let country = table.require("Country", path)?;
    let imf = table.require("IMF_Value", path)?;
    let cia = table.require("CIA_Value", path)?;
    let col = |name: &str| table.column(name);

    // Every "...Value" column may carry percent signs or thousands separators.
    const VALUE_STRIP: &[char] = &['%', ','];

    Ok(table
        .rows
        .iter()
        .map(|r| GdpRecord {
            country: text(r, Some(country)),
            imf_value: number(r, Some(imf), VALUE_STRIP),
            imf_year: text(r, col("IMF_Year")),
            world_bank_value: number(r, col("World_Bank_Value"), VALUE_STRIP),
            world_bank_year: text(r, col("World_Bank_Year")),
            cia_value: number(r, Some(cia), VALUE_STRIP),
            cia_year: text(r, col("CIA_Year")),
        })
        .collect())
}
