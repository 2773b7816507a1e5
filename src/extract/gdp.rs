//! GDP (PPP) per capita table: IMF, World Bank and CIA estimates per country.

use std::path::Path;

use tracing::info;

use crate::data::TableSource;
use crate::domain::{Extraction, GdpRecord, RawTable, GDP_HEADER};
use crate::error::{AppError, ErrorKind};
use crate::extract::columns::{FieldSpec, Leaf};
use crate::extract::{clean_rows, Shape, SourceRow};
use crate::io::write_records;

/// Substrings the stringified header set must contain.
pub const REQUIRED_HEADER_TEXT: [&str; 2] = ["Country/Territory", "IMF"];

const IMF: &[&str] = &["IMF", "International Monetary Fund"];
const WORLD_BANK: &[&str] = &["World Bank"];
const CIA: &[&str] = &["CIA", "World Factbook"];

const SHAPE: Shape = Shape {
    country_label: "Country",
    fields: [
        FieldSpec { name: "IMF_Value", sources: IMF, leaf: Leaf::Value },
        FieldSpec { name: "IMF_Year", sources: IMF, leaf: Leaf::Year },
        FieldSpec { name: "World_Bank_Value", sources: WORLD_BANK, leaf: Leaf::Value },
        FieldSpec { name: "World_Bank_Year", sources: WORLD_BANK, leaf: Leaf::Year },
        FieldSpec { name: "CIA_Value", sources: CIA, leaf: Leaf::Value },
        FieldSpec { name: "CIA_Year", sources: CIA, leaf: Leaf::Year },
    ],
    note_pattern: "Notes|References|Footnotes",
    strip: &['$', ','],
};

pub fn select_table(tables: &[RawTable]) -> Result<&RawTable, AppError> {
    tables
        .iter()
        .find(|t| {
            let text = t.header_text();
            REQUIRED_HEADER_TEXT.iter().all(|needle| text.contains(needle))
        })
        .ok_or_else(|| {
            AppError::new(
                ErrorKind::TableNotFound,
                format!(
                    "Could not find the GDP (PPP) per capita table among {} tables (headers must mention {}).",
                    tables.len(),
                    REQUIRED_HEADER_TEXT.join(" and ")
                ),
            )
        })
}

pub fn clean_table(table: &RawTable) -> Result<Extraction<GdpRecord>, AppError> {
    let (rows, stats) = clean_rows(table, &SHAPE)?;
    Ok(Extraction {
        records: rows.into_iter().map(GdpRecord::from).collect(),
        stats,
    })
}

/// Fetch `url`, select and clean the GDP table, write it to `out`.
pub fn extract(source: &dyn TableSource, url: &str, out: &Path) -> Result<Extraction<GdpRecord>, AppError> {
    let tables = source.fetch_tables(url)?;
    let table = select_table(&tables)?;
    let extraction = clean_table(table)?;

    if extraction.records.is_empty() {
        return Err(AppError::new(
            ErrorKind::Empty,
            "GDP table contained no country rows after cleaning.",
        ));
    }

    write_records(out, &GDP_HEADER, &extraction.records)?;
    info!(
        rows = extraction.records.len(),
        coerced_missing = extraction.stats.cells_coerced_missing,
        path = %out.display(),
        "wrote gdp table"
    );
    Ok(extraction)
}

impl From<SourceRow> for GdpRecord {
    fn from(row: SourceRow) -> Self {
        let [imf_value, world_bank_value, cia_value] = row.values;
        let [imf_year, world_bank_year, cia_year] = row.years;
        Self {
            country: row.country,
            imf_value,
            imf_year,
            world_bank_value,
            world_bank_year,
            cia_value,
            cia_year,
        }
    }
}
