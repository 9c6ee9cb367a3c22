//! Table beautification: fenced code blocks containing pipe-table
//! content are replaced with styled HTML tables.
//!
//! A fenced block matches when it holds a header row, a separator row
//! of dashes/pipes, and one or more data rows. Blocks that do not
//! match are passed through unchanged; that is the contract, not an
//! error.

use crate::config::BrandColors;
use crate::transform::escape_html;
use regex::Regex;
use std::sync::LazyLock;

/// First-cell patterns that mark a summary row.
static TOTAL_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(total|sum|subtotal|grand total)").expect("valid total-row regex")
});

/// Currency values: `$50,000`, `€1 234.50`.
static CURRENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[$€£]\s?-?\d[\d,]*(\.\d+)?$").expect("valid currency regex")
});

/// Plain numbers with optional thousands separators, decimals, and a
/// trailing percent sign: `1,234.56`, `42%`, `-3.5`.
static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d{1,3}(,\d{3})*(\.\d+)?%?$|^-?\d+(\.\d+)?%?$").expect("valid numeric regex")
});

/// Separator rows: dashes, pipes, colons, whitespace, at least one
/// dash.
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s|:-]+$").expect("valid separator regex"));

/// A parsed pipe table.
#[derive(Debug)]
struct PipeTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Replace pipe-table fenced code blocks with styled HTML tables.
/// Non-matching fenced blocks are emitted unchanged.
pub fn beautify_tables(markdown: &str, colors: &BrandColors) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut lines = markdown.lines().peekable();

    while let Some(line) = lines.next() {
        let trimmed = line.trim_start();
        if !trimmed.starts_with("```") {
            out.push_str(line);
            out.push('\n');
            continue;
        }

        // Collect the fenced block.
        let fence_open = line;
        let mut block: Vec<&str> = Vec::new();
        let mut fence_close: Option<&str> = None;
        for inner in lines.by_ref() {
            if inner.trim_start().starts_with("```") {
                fence_close = Some(inner);
                break;
            }
            block.push(inner);
        }

        match (parse_pipe_table(&block), fence_close) {
            (Some(table), Some(_)) => {
                out.push_str(&render_table_html(&table, colors));
                out.push('\n');
            }
            _ => {
                // Pass through unchanged, including an unterminated
                // fence at end of input.
                out.push_str(fence_open);
                out.push('\n');
                for inner in &block {
                    out.push_str(inner);
                    out.push('\n');
                }
                if let Some(close) = fence_close {
                    out.push_str(close);
                    out.push('\n');
                }
            }
        }
    }

    out
}

/// Try to parse fenced-block lines as a pipe table: header row,
/// separator row, one or more data rows.
fn parse_pipe_table(lines: &[&str]) -> Option<PipeTable> {
    let lines: Vec<&str> = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 3 {
        return None;
    }
    if lines.iter().any(|l| !l.contains('|')) {
        return None;
    }

    let separator = lines[1];
    if !SEPARATOR_RE.is_match(separator) || !separator.contains('-') {
        return None;
    }

    let header = split_row(lines[0]);
    if header.is_empty() {
        return None;
    }

    let rows: Vec<Vec<String>> = lines[2..].iter().map(|l| split_row(l)).collect();
    if rows.is_empty() || rows.iter().any(|r| r.is_empty()) {
        return None;
    }

    Some(PipeTable { header, rows })
}

/// Split a pipe-delimited row into trimmed cells, dropping the empty
/// boundary segments produced by leading/trailing pipes.
fn split_row(line: &str) -> Vec<String> {
    let mut cells: Vec<&str> = line.split('|').map(str::trim).collect();
    if cells.first() == Some(&"") {
        cells.remove(0);
    }
    if cells.last() == Some(&"") {
        cells.pop();
    }
    cells.into_iter().map(String::from).collect()
}

/// Whether a cell value should be right-aligned.
fn is_numeric_cell(value: &str) -> bool {
    CURRENCY_RE.is_match(value) || NUMERIC_RE.is_match(value)
}

/// Whether a data row is a summary row, judged by its first cell.
fn is_total_row(row: &[String]) -> bool {
    row.first().is_some_and(|cell| TOTAL_ROW_RE.is_match(cell))
}

fn render_table_html(table: &PipeTable, colors: &BrandColors) -> String {
    let header_bg = colors.table_header.to_css();
    let total_bg = colors.table_header.lighten(0.6).to_css();
    let alt_bg = colors.table_row_alt.to_css();

    let mut out = String::new();
    out.push_str(
        "<table style=\"border-collapse: collapse; width: 100%; margin: 1em 0; \
         font-size: 10.5pt;\">\n",
    );

    out.push_str("<thead><tr>");
    for cell in &table.header {
        out.push_str(&format!(
            "<th style=\"background: {}; color: #ffffff; padding: 6px 10px; \
             text-align: left; border: 1px solid {};\">{}</th>",
            header_bg,
            header_bg,
            escape_html(cell)
        ));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for (index, row) in table.rows.iter().enumerate() {
        let (row_bg, weight) = if is_total_row(row) {
            (total_bg.clone(), "bold")
        } else if index % 2 == 1 {
            (alt_bg.clone(), "normal")
        } else {
            ("#ffffff".to_string(), "normal")
        };

        out.push_str(&format!(
            "<tr style=\"background: {}; font-weight: {};\">",
            row_bg, weight
        ));
        for cell in row {
            let align = if is_numeric_cell(cell) { "right" } else { "left" };
            out.push_str(&format!(
                "<td style=\"padding: 5px 10px; text-align: {}; \
                 border: 1px solid #d8dde3;\">{}</td>",
                align,
                escape_html(cell)
            ));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_BLOCK: &str = "```\n\
        Month | Phase | Budget\n\
        ------|-------|-------\n\
        Jan | Planning | $10,000\n\
        Feb | Build | $25,000\n\
        Total | | $50,000\n\
        ```\n";

    #[test]
    fn test_valid_table_has_header_and_k_data_rows() {
        let html = beautify_tables(TABLE_BLOCK, &BrandColors::default());
        assert_eq!(html.matches("<th ").count(), 3);
        assert_eq!(html.matches("<tr style").count(), 3);
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_total_row_styled_regardless_of_position() {
        let colors = BrandColors::default();
        let total_bg = colors.table_header.lighten(0.6).to_css();

        let block = "```\n\
            A | B\n\
            --|--\n\
            Subtotal | $5\n\
            Jan | ok\n\
            ```\n";
        let html = beautify_tables(block, &colors);
        assert!(html.contains(&total_bg));
        assert!(html.contains("font-weight: bold"));
    }

    #[test]
    fn test_total_row_case_insensitive() {
        let row = vec!["GRAND TOTAL".to_string(), "$1".to_string()];
        assert!(is_total_row(&row));
        let row = vec!["sum of parts".to_string()];
        assert!(is_total_row(&row));
        let row = vec!["Totally unrelated?".to_string()];
        // Prefix match is intentional; "Totally" matches "total".
        assert!(is_total_row(&row));
        let row = vec!["Jan".to_string()];
        assert!(!is_total_row(&row));
    }

    #[test]
    fn test_numeric_cells_right_aligned() {
        for value in ["$50,000", "1,234.56", "42%", "-3.5", "1000", "€ 200"] {
            assert!(is_numeric_cell(value), "{} should be numeric", value);
        }
        for value in ["Planning", "Jan", "Q1 2026", "a1"] {
            assert!(!is_numeric_cell(value), "{} should not be numeric", value);
        }
    }

    #[test]
    fn test_non_table_fenced_block_passes_through() {
        let block = "```rust\nfn main() {}\n```\n";
        let out = beautify_tables(block, &BrandColors::default());
        assert_eq!(out, block);
    }

    #[test]
    fn test_block_without_separator_passes_through() {
        let block = "```\na | b\nc | d\ne | f\n```\n";
        let out = beautify_tables(block, &BrandColors::default());
        assert_eq!(out, block);
    }

    #[test]
    fn test_unterminated_fence_passes_through() {
        let block = "text\n```\na | b\n";
        let out = beautify_tables(block, &BrandColors::default());
        assert_eq!(out, block);
    }

    #[test]
    fn test_cell_text_is_escaped() {
        let block = "```\nName | Note\n--|--\n<b>x</b> | a & b\n```\n";
        let html = beautify_tables(block, &BrandColors::default());
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn test_scenario_total_vs_sibling_row() {
        let colors = BrandColors::default();
        let html = beautify_tables(TABLE_BLOCK, &colors);
        let total_bg = colors.table_header.lighten(0.6).to_css();

        let total_line = html
            .lines()
            .find(|l| l.contains("Total"))
            .expect("total row rendered");
        assert!(total_line.contains(&total_bg));
        assert!(total_line.contains("bold"));

        let jan_line = html
            .lines()
            .find(|l| l.contains("Jan"))
            .expect("jan row rendered");
        assert!(!jan_line.contains(&total_bg));
        assert!(!jan_line.contains("bold"));
        // Currency right-aligned, text left-aligned.
        assert!(jan_line.contains("text-align: right; border: 1px solid #d8dde3;\">$10,000"));
        assert!(jan_line.contains("text-align: left; border: 1px solid #d8dde3;\">Planning"));
    }
}
