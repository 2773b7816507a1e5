//! Tariff-rate table: World Bank, WTO and UNCTAD rates per country.

use std::path::Path;

use tracing::info;

use crate::data::TableSource;
use crate::domain::{Extraction, RawTable, TariffRecord, TARIFF_HEADER};
use crate::error::{AppError, ErrorKind};
use crate::extract::columns::{FieldSpec, Leaf};
use crate::extract::{clean_rows, Shape, SourceRow};
use crate::io::write_records;

/// Label the first column header must contain.
pub const COUNTRY_HEADER: &str = "Country/Territory/Region/Group";

/// Minimum width of a candidate table.
pub const MIN_COLUMNS: usize = 7;

const WB: &[&str] = &["World Bank"];
const WTO: &[&str] = &["WTO", "World Trade Organization"];
const UNCTAD: &[&str] = &["UNCTAD"];

const SHAPE: Shape = Shape {
    country_label: "Country",
    fields: [
        FieldSpec { name: "WB_Rate", sources: WB, leaf: Leaf::Value },
        FieldSpec { name: "WB_Year", sources: WB, leaf: Leaf::Year },
        FieldSpec { name: "WTO_Rate", sources: WTO, leaf: Leaf::Value },
        FieldSpec { name: "WTO_Year", sources: WTO, leaf: Leaf::Year },
        FieldSpec { name: "UNCTAD_Rate", sources: UNCTAD, leaf: Leaf::Value },
        FieldSpec { name: "UNCTAD_Year", sources: UNCTAD, leaf: Leaf::Year },
    ],
    note_pattern: "Notes:|References",
    strip: &['%'],
};

/// First table with at least `MIN_COLUMNS` columns whose first header names countries.
pub fn select_table(tables: &[RawTable]) -> Result<&RawTable, AppError> {
    tables
        .iter()
        .find(|t| {
            t.column_count() >= MIN_COLUMNS
                && t.header_path(0).iter().any(|label| label.contains(COUNTRY_HEADER))
        })
        .ok_or_else(|| {
            AppError::new(
                ErrorKind::TableNotFound,
                format!(
                    "Could not find the tariff rate table among {} tables (need >= {MIN_COLUMNS} columns and a '{COUNTRY_HEADER}' first header).",
                    tables.len()
                ),
            )
        })
}

pub fn clean_table(table: &RawTable) -> Result<Extraction<TariffRecord>, AppError> {
    let (rows, stats) = clean_rows(table, &SHAPE)?;
    Ok(Extraction {
        records: rows.into_iter().map(TariffRecord::from).collect(),
        stats,
    })
}

/// Fetch `url`, select and clean the tariff table, write it to `out`.
pub fn extract(source: &dyn TableSource, url: &str, out: &Path) -> Result<Extraction<TariffRecord>, AppError> {
    let tables = source.fetch_tables(url)?;
    let table = select_table(&tables)?;
    let extraction = clean_table(table)?;

    if extraction.records.is_empty() {
        return Err(AppError::new(
            ErrorKind::Empty,
            "Tariff table contained no country rows after cleaning.",
        ));
    }

    write_records(out, &TARIFF_HEADER, &extraction.records)?;
    info!(
        rows = extraction.records.len(),
        coerced_missing = extraction.stats.cells_coerced_missing,
        path = %out.display(),
        "wrote tariff table"
    );
    Ok(extraction)
}

impl From<SourceRow> for TariffRecord {
    fn from(row: SourceRow) -> Self {
        let [wb_rate, wto_rate, unctad_rate] = row.values;
        let [wb_year, wto_year, unctad_year] = row.years;
        Self {
            country: row.country,
            wb_rate,
            wb_year,
            wto_rate,
            wto_year,
            unctad_rate,
            unctad_year,
        }
    }
}
