//! Text normalization shared by the HTML reader and the cleaners.

/// Windows-1252 mojibake of common UTF-8 punctuation, and the intended text.
const MOJIBAKE: &[(&str, &str)] = &[
    ("â€”", "—"),
    ("â€“", "–"),
    ("â€™", "’"),
    ("â€œ", "“"),
    ("â€\u{9d}", "”"),
    ("âˆ’", "−"),
    ("Â\u{a0}", "\u{a0}"),
];

/// Undo UTF-8-read-as-Windows-1252 damage for the sequences these pages carry.
pub fn repair_mojibake(s: &str) -> String {
    if !s.contains('â') && !s.contains('Â') {
        return s.to_string();
    }
    let mut out = s.to_string();
    for (broken, fixed) in MOJIBAKE {
        if out.contains(broken) {
            out = out.replace(broken, fixed);
        }
    }
    out
}

/// Collapse whitespace runs (including non-breaking spaces) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Remove `[ ... ]` footnote markers such as `[1]`, `[a]` or `[n 2]`.
/// An unclosed `[` is kept verbatim.
pub fn strip_footnotes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find('[') {
        match rest[open..].find(']') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Full cell normalization applied to every parsed table cell.
pub fn clean_cell(s: &str) -> String {
    normalize_ws(&strip_footnotes(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairs_dash_mojibake() {
        assert_eq!(repair_mojibake("â€”"), "—");
        assert_eq!(repair_mojibake("1â€“2"), "1–2");
        assert_eq!(repair_mojibake("plain"), "plain");
    }

    #[test]
    fn strips_footnotes_and_whitespace() {
        assert_eq!(clean_cell("  Taiwan[a]\u{a0}[12] "), "Taiwan");
        assert_eq!(clean_cell("5.2 %[n 1]"), "5.2 %");
        assert_eq!(clean_cell("open [bracket"), "open [bracket");
    }
}
