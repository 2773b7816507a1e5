//! Table extraction: pick one table from a page, clean it, persist it.
//!
//! Both pages share one shape: a country column followed by three data
//! sources, each contributing a numeric value and the year it refers to.
//! `tariff` and `gdp` only differ in how the table is selected, which sources
//! exist, which note rows are dropped and which characters decorate numbers.

use crate::domain::{CleanStats, RawTable};
use crate::error::AppError;

pub mod clean;
pub mod columns;
pub mod gdp;
pub mod tariff;

use clean::{coerce_counted, NoteFilter};
use columns::{resolve_columns, FieldSpec};

/// Page-specific cleaning parameters.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Shape {
    pub country_label: &'static str,
    /// `[value0, year0, value1, year1, value2, year2]`.
    pub fields: [FieldSpec; 6],
    pub note_pattern: &'static str,
    pub strip: &'static [char],
}

/// A cleaned row before it is given its schema names.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SourceRow {
    pub country: String,
    pub values: [Option<f64>; 3],
    pub years: [String; 3],
}

pub(crate) fn clean_rows(table: &RawTable, shape: &Shape) -> Result<(Vec<SourceRow>, CleanStats), AppError> {
    let map = resolve_columns(table, shape.country_label, &shape.fields)?;
    let notes = NoteFilter::new(shape.note_pattern)?;

    let mut stats = CleanStats {
        rows_in: table.rows.len(),
        ..CleanStats::default()
    };
    let mut out = Vec::with_capacity(table.rows.len());

    for row in 0..table.rows.len() {
        // Note rows are recognised by the first cell, whatever column holds the country.
        if notes.is_note(table.cell(row, 0)) {
            stats.rows_dropped_notes += 1;
            continue;
        }

        let country = table.cell(row, map.country).to_string();
        if country.trim().is_empty() {
            stats.rows_dropped_blank += 1;
            continue;
        }

        let mut values = [None; 3];
        let mut years: [String; 3] = Default::default();
        for source in 0..3 {
            let raw_value = table.cell(row, map.get(source * 2));
            values[source] = coerce_counted(raw_value, shape.strip, &mut stats);
            years[source] = table.cell(row, map.get(source * 2 + 1)).to_string();
        }

        out.push(SourceRow {
            country,
            values,
            years,
        });
    }

    Ok((out, stats))
}
