//! Cell-level cleaning: note-row detection and best-effort numeric coercion.
//!
//! Coercion never fails. A cell either yields a finite number, is a known
//! "no data" marker, or is unparseable; the last two both become missing, but
//! unparseable cells are counted so the caller can report them.

use regex::Regex;

use crate::domain::CleanStats;
use crate::error::{AppError, ErrorKind};

/// Cells meaning "no data", compared after stripping and trimming.
/// `â€”` is the em dash read through the wrong codec; kept for files cleaned elsewhere.
pub const MISSING_MARKERS: &[&str] = &["—", "–", "-", "â€”", "â€“", "NaN", "nan", "n/a", "N/A", "None"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    Value(f64),
    /// Empty or a missing marker.
    Blank,
    /// Had content that is not a number.
    Unparseable,
}

impl Coerced {
    pub fn value(self) -> Option<f64> {
        match self {
            Coerced::Value(v) => Some(v),
            Coerced::Blank | Coerced::Unparseable => None,
        }
    }
}

/// Remove every char in `strip`, then parse what is left as a finite float.
pub fn coerce(raw: &str, strip: &[char]) -> Coerced {
    let stripped: String = raw
        .chars()
        .filter(|c| !strip.contains(c))
        .map(|c| if c == '\u{2212}' { '-' } else { c })
        .collect();
    let s = stripped.trim();

    if s.is_empty() || MISSING_MARKERS.contains(&s) {
        return Coerced::Blank;
    }

    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Coerced::Value(v),
        Ok(_) => Coerced::Blank,
        Err(_) => Coerced::Unparseable,
    }
}

pub fn coerce_number(raw: &str, strip: &[char]) -> Option<f64> {
    coerce(raw, strip).value()
}

/// `coerce_number`, bumping `stats.cells_coerced_missing` for unparseable content.
pub fn coerce_counted(raw: &str, strip: &[char], stats: &mut CleanStats) -> Option<f64> {
    match coerce(raw, strip) {
        Coerced::Value(v) => Some(v),
        Coerced::Blank => None,
        Coerced::Unparseable => {
            stats.cells_coerced_missing += 1;
            None
        }
    }
}

/// Case-sensitive substring filter for annotation rows ("Notes:", "References", ...).
#[derive(Debug, Clone)]
pub struct NoteFilter {
    re: Regex,
}

impl NoteFilter {
    pub fn new(pattern: &str) -> Result<Self, AppError> {
        let re = Regex::new(pattern)
            .map_err(|e| AppError::new(ErrorKind::Config, format!("Invalid note pattern '{pattern}': {e}")))?;
        Ok(Self { re })
    }

    pub fn is_note(&self, first_cell: &str) -> bool {
        self.re.is_match(first_cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_and_parses() {
        assert_eq!(coerce_number("5%", &['%']), Some(5.0));
        assert_eq!(coerce_number("$10,000", &['$', ',']), Some(10_000.0));
        assert_eq!(coerce_number(" 3.25 ", &[]), Some(3.25));
        assert_eq!(coerce_number("\u{2212}1.5", &[]), Some(-1.5));
    }

    #[test]
    fn markers_and_junk_become_missing() {
        assert_eq!(coerce("—", &['%']), Coerced::Blank);
        assert_eq!(coerce("â€”", &['%']), Coerced::Blank);
        assert_eq!(coerce("", &[]), Coerced::Blank);
        assert_eq!(coerce("inf", &[]), Coerced::Blank);
        assert_eq!(coerce("abc", &[]), Coerced::Unparseable);
        assert_eq!(coerce("1.2.3", &[]), Coerced::Unparseable);
    }

    #[test]
    fn coercion_is_idempotent() {
        for raw in ["5%", "12.75", "$1,234.5", "—", "x"] {
            let once = coerce_number(raw, &['%', '$', ',']);
            let again = once.and_then(|v| coerce_number(&v.to_string(), &['%', '$', ',']));
            assert_eq!(once, again, "raw={raw}");
        }
    }

    #[test]
    fn counts_only_unparseable_cells() {
        let mut stats = CleanStats::default();
        coerce_counted("—", &[], &mut stats);
        coerce_counted("", &[], &mut stats);
        coerce_counted("n.a.", &[], &mut stats);
        coerce_counted("4", &[], &mut stats);
        assert_eq!(stats.cells_coerced_missing, 1);
    }

    #[test]
    fn note_filter_is_case_sensitive_substring() {
        let f = NoteFilter::new("Notes:|References").unwrap();
        assert!(f.is_note("Notes: figures are estimates"));
        assert!(f.is_note("See References"));
        assert!(!f.is_note("notes: lower case"));
        assert!(!f.is_note("Testland"));
    }
}
