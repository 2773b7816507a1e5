//! Header-name column mapping.
//!
//! Each schema field names the data sources it may come from and whether it is
//! the value or the year of that source. A column matches when one of its
//! header labels contains a source name (case-sensitive) and its year-ness
//! agrees (any label containing "year", case-insensitive).
//!
//! A flat header such as `World Bank | Year | WTO | Year` names the source only
//! on the value column; a year column without a source label belongs to the
//! nearest source column on its left.

use crate::domain::RawTable;
use crate::error::{AppError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaf {
    Value,
    Year,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub sources: &'static [&'static str],
    pub leaf: Leaf,
}

/// Resolved column index per schema field, plus the country column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub country: usize,
    /// Same order as the `fields` slice passed to `resolve_columns`.
    pub fields: Vec<usize>,
}

impl ColumnMap {
    pub fn get(&self, field: usize) -> usize {
        self.fields[field]
    }
}

/// Map `fields` onto `table`'s columns, failing with every missing field named.
pub fn resolve_columns(
    table: &RawTable,
    country_label: &str,
    fields: &[FieldSpec],
) -> Result<ColumnMap, AppError> {
    let width = table.column_count();
    let country = (0..width).find(|&c| table.header_path(c).iter().any(|l| l.contains(country_label)));

    let paths = effective_paths(table, fields);

    let mut used: Vec<usize> = country.into_iter().collect();
    let mut resolved = Vec::with_capacity(fields.len());
    let mut missing = Vec::new();

    for field in fields {
        let found = (0..width)
            .filter(|c| !used.contains(c))
            .find(|&c| column_matches(&paths[c], field));
        match found {
            Some(c) => {
                used.push(c);
                resolved.push(c);
            }
            None => missing.push(field.name),
        }
    }

    let Some(country) = country else {
        missing.insert(0, "Country");
        return Err(missing_error(table, &missing));
    };
    if !missing.is_empty() {
        return Err(missing_error(table, &missing));
    }

    Ok(ColumnMap {
        country,
        fields: resolved,
    })
}

/// Header paths with sourceless year columns given their left neighbour's source labels.
fn effective_paths(table: &RawTable, fields: &[FieldSpec]) -> Vec<Vec<String>> {
    let names_source = |path: &[String]| fields.iter().any(|f| path_names_source(path, f.sources));

    let mut last_source: Option<&[String]> = None;
    let mut out = Vec::with_capacity(table.column_count());
    for c in 0..table.column_count() {
        let path = table.header_path(c);
        let mut effective = path.to_vec();
        if names_source(path) {
            last_source = Some(path);
        } else if is_year_path(path) {
            if let Some(source) = last_source {
                effective.extend(source.iter().cloned());
            }
        }
        out.push(effective);
    }
    out
}

fn path_names_source(path: &[String], sources: &[&str]) -> bool {
    path.iter().any(|label| sources.iter().any(|src| label.contains(src)))
}

fn is_year_path(path: &[String]) -> bool {
    path.iter().any(|label| label.to_lowercase().contains("year"))
}

fn column_matches(path: &[String], field: &FieldSpec) -> bool {
    let from_source = path_names_source(path, field.sources);
    let is_year = is_year_path(path);
    from_source
        && match field.leaf {
            Leaf::Year => is_year,
            Leaf::Value => !is_year,
        }
}

fn missing_error(table: &RawTable, missing: &[&str]) -> AppError {
    AppError::new(
        ErrorKind::MissingColumns,
        format!(
            "Selected table lacks columns for {}; headers were: {}",
            missing.join(", "),
            table.header_text()
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec { name: "IMF_Value", sources: &["IMF"], leaf: Leaf::Value },
        FieldSpec { name: "IMF_Year", sources: &["IMF"], leaf: Leaf::Year },
        FieldSpec { name: "CIA_Value", sources: &["CIA"], leaf: Leaf::Value },
    ];

    fn table(columns: &[&[&str]]) -> RawTable {
        RawTable {
            columns: columns
                .iter()
                .map(|p| p.iter().map(|s| s.to_string()).collect())
                .collect(),
            rows: Vec::new(),
        }
    }

    #[test]
    fn maps_by_name_regardless_of_order() {
        let t = table(&[
            &["Country/Territory", "Country/Territory"],
            &["CIA", "Estimate"],
            &["IMF", "Year"],
            &["IMF", "Estimate"],
        ]);
        let map = resolve_columns(&t, "Country", FIELDS).unwrap();
        assert_eq!(map.country, 0);
        assert_eq!(map.fields, vec![3, 2, 1]);
    }

    #[test]
    fn reports_every_missing_field() {
        let t = table(&[&["Country/Territory"], &["IMF", "Estimate"]]);
        let err = resolve_columns(&t, "Country", FIELDS).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingColumns);
        assert!(err.message().contains("IMF_Year, CIA_Value"));
    }

    #[test]
    fn flat_year_headers_follow_the_source_on_their_left() {
        let t = table(&[
            &["Country/Territory"],
            &["IMF"],
            &["Year"],
            &["Rank"],
            &["CIA"],
            &["Year"],
        ]);
        let fields = &[
            FIELDS[0],
            FIELDS[1],
            FIELDS[2],
            FieldSpec { name: "CIA_Year", sources: &["CIA"], leaf: Leaf::Year },
        ];
        let map = resolve_columns(&t, "Country", fields).unwrap();
        assert_eq!(map.fields, vec![1, 2, 4, 5]);
    }

    #[test]
    fn year_without_any_source_to_its_left_stays_unmatched() {
        let t = table(&[&["Country"], &["Year"], &["IMF"]]);
        let err = resolve_columns(&t, "Country", &FIELDS[..2]).unwrap_err();
        assert!(err.message().contains("IMF_Year"));
    }

    #[test]
    fn source_match_is_case_sensitive() {
        // "Financial" must not satisfy the "CIA" source.
        let t = table(&[&["Country"], &["IMF", "Estimate"], &["IMF", "Year"], &["Financial", "Estimate"]]);
        let err = resolve_columns(&t, "Country", FIELDS).unwrap_err();
        assert!(err.message().contains("CIA_Value"));
    }
}
