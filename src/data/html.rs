//! HTML table reader.
//!
//! Turns every `<table>` of a document into a `RawTable`:
//!
//! - header rows are the rows inside `<thead>` plus any leading rows made only
//!   of `<th>` cells; everything after is body
//! - `colspan`/`rowspan` are expanded so the grid is rectangular and every
//!   column gets a full header path
//! - hidden content (`display:none`, `<style>`, `<script>`) is skipped
//! - nested tables are read as their own tables, never merged into the parent

use scraper::{ElementRef, Html, Node};

use crate::data::text::clean_cell;
use crate::domain::RawTable;

/// Upper bound for `colspan`/`rowspan` attributes.
const MAX_SPAN: usize = 1000;

#[derive(Debug, Clone)]
struct Cell {
    text: String,
    is_header: bool,
    colspan: usize,
    rowspan: usize,
}

#[derive(Debug, Clone)]
struct Row {
    cells: Vec<Cell>,
    in_thead: bool,
}

/// Parse all tables of `html` in document order.
pub fn parse_tables(html: &str) -> Vec<RawTable> {
    let doc = Html::parse_document(html);
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "table")
        .map(read_table)
        .collect()
}

fn read_table(table: ElementRef<'_>) -> RawTable {
    let rows: Vec<Row> = own_rows(table).into_iter().map(read_row).collect();

    let header_count = rows
        .iter()
        .take_while(|r| r.in_thead || (!r.cells.is_empty() && r.cells.iter().all(|c| c.is_header)))
        .count();

    let grid = expand_spans(&rows);
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);

    let (head, body) = grid.split_at(header_count.min(grid.len()));

    let columns = if head.is_empty() {
        Vec::new()
    } else {
        (0..width)
            .map(|c| {
                head.iter()
                    .map(|r| r.get(c).cloned().unwrap_or_default())
                    .collect()
            })
            .collect()
    };

    let rows = body
        .iter()
        .map(|r| {
            let mut r = r.clone();
            r.resize(width, String::new());
            r
        })
        .collect();

    RawTable { columns, rows }
}

/// `<tr>` elements whose nearest enclosing table is `table`.
fn own_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    table
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr")
        .filter(|tr| nearest_ancestor(*tr, "table").map(|t| t.id()) == Some(table.id()))
        .collect()
}

fn nearest_ancestor<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == name)
}

fn read_row(tr: ElementRef<'_>) -> Row {
    let in_thead = nearest_ancestor(tr, "thead").is_some_and(|thead| {
        nearest_ancestor(thead, "table").map(|t| t.id()) == nearest_ancestor(tr, "table").map(|t| t.id())
    });

    let cells = tr
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
        .map(|el| Cell {
            text: clean_cell(&visible_text(el)),
            is_header: el.value().name() == "th",
            colspan: span_attr(el, "colspan"),
            rowspan: span_attr(el, "rowspan"),
        })
        .collect();

    Row { cells, in_thead }
}

fn span_attr(el: ElementRef<'_>, name: &str) -> usize {
    el.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, MAX_SPAN)
}

fn visible_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(el, &mut out);
    out
}

fn collect_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = child_el.value().name();
                if name == "br" {
                    out.push(' ');
                    continue;
                }
                if matches!(name, "style" | "script" | "table") || is_hidden(child_el) {
                    continue;
                }
                collect_text(child_el, out);
            }
            _ => {}
        }
    }
}

fn is_hidden(el: ElementRef<'_>) -> bool {
    el.value().attr("style").is_some_and(|style| {
        let compact: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        compact.contains("display:none")
    })
}

/// Lay cells out on a grid, repeating spanned cells into every slot they cover.
fn expand_spans(rows: &[Row]) -> Vec<Vec<String>> {
    // Per column: rows still to fill from an earlier rowspan, and the text.
    let mut carry: Vec<Option<(usize, String)>> = Vec::new();
    let mut grid = Vec::with_capacity(rows.len());

    for row in rows {
        let mut out: Vec<String> = Vec::new();
        let mut cells = row.cells.iter();

        loop {
            let col = out.len();
            if let Some(Some((left, text))) = carry.get_mut(col) {
                out.push(text.clone());
                *left -= 1;
                if *left == 0 {
                    carry[col] = None;
                }
                continue;
            }

            let Some(cell) = cells.next() else {
                // Trailing carried columns beyond the last real cell.
                if carry.iter().skip(col).any(Option::is_some) {
                    out.push(String::new());
                    continue;
                }
                break;
            };

            for _ in 0..cell.colspan {
                let col = out.len();
                out.push(cell.text.clone());
                if cell.rowspan > 1 {
                    if carry.len() <= col {
                        carry.resize(col + 1, None);
                    }
                    carry[col] = Some((cell.rowspan - 1, cell.text.clone()));
                }
            }
        }

        grid.push(out);
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_LEVEL: &str = r#"
        <table class="wikitable">
          <tbody>
            <tr>
              <th rowspan="2">Country/Territory</th>
              <th colspan="2">IMF<sup class="reference">[5]</sup></th>
            </tr>
            <tr><th>Estimate</th><th>Year</th></tr>
            <tr><td>Testland <span style="display: none">hidden</span></td><td>$10,000</td><td>2021</td></tr>
            <tr><td colspan="3">Notes: something</td></tr>
          </tbody>
        </table>"#;

    #[test]
    fn expands_multi_level_header() {
        let tables = parse_tables(TWO_LEVEL);
        assert_eq!(tables.len(), 1);
        let t = &tables[0];
        assert_eq!(t.columns.len(), 3);
        assert_eq!(t.header_path(0), ["Country/Territory", "Country/Territory"]);
        assert_eq!(t.header_path(1), ["IMF", "Estimate"]);
        assert_eq!(t.header_path(2), ["IMF", "Year"]);
        assert_eq!(t.rows[0], vec!["Testland", "$10,000", "2021"]);
        assert_eq!(t.rows[1], vec!["Notes: something"; 3]);
    }

    #[test]
    fn body_rowspan_repeats_value() {
        let html = r#"<table>
            <tr><th>A</th><th>B</th></tr>
            <tr><td rowspan="2">x</td><td>1</td></tr>
            <tr><td>2</td></tr>
        </table>"#;
        let t = &parse_tables(html)[0];
        assert_eq!(t.rows, vec![vec!["x", "1"], vec!["x", "2"]]);
    }

    #[test]
    fn nested_tables_stay_separate() {
        let html = r#"<table>
            <tr><th>Outer</th></tr>
            <tr><td>o1<table><tr><th>Inner</th></tr><tr><td>i1</td></tr></table></td></tr>
        </table>"#;
        let tables = parse_tables(html);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows, vec![vec!["o1"]]);
        assert_eq!(tables[1].header_path(0), ["Inner"]);
        assert_eq!(tables[1].rows, vec![vec!["i1"]]);
    }

    #[test]
    fn table_without_header_rows_has_no_columns() {
        let t = &parse_tables("<table><tr><td>a</td><td>b</td></tr></table>")[0];
        assert!(t.columns.is_empty());
        assert_eq!(t.column_count(), 2);
    }
}
