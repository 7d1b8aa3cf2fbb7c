//! Markdown pipe-table rendering.
//!
//! Layout is delegated to comfy-table's Markdown preset; column widths follow
//! terminal display width, so wide characters stay aligned. Cell text is
//! emitted as-is, so a `|` inside a cell will split it; callers that care must
//! pre-escape.

use comfy_table::{presets, ContentArrangement, Table};

/// Column headers used by every key/value section of an issue.
pub const KEY_VALUE_HEADERS: [&str; 2] = ["Key", "Value"];

/// Render `rows` under `column_headers` as a Markdown table.
///
/// Returns an empty string when `rows` is empty. With `sort_rows`, rows are
/// ordered by their first column using a stable sort, so rows sharing a first
/// column keep their input order.
pub fn render_table(column_headers: &[&str], mut rows: Vec<Vec<String>>, sort_rows: bool) -> String {
    if rows.is_empty() {
        return String::new();
    }
    if sort_rows {
        rows.sort_by(|a, b| first_cell(a).cmp(first_cell(b)));
    }

    let mut table = Table::new();
    table
        .load_preset(presets::ASCII_MARKDOWN)
        .set_content_arrangement(ContentArrangement::Disabled)
        .force_no_tty()
        .set_header(column_headers.iter().copied());
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Render key/value pairs as a two-column `Key | Value` table.
pub fn render_key_value_table<I, K, V>(entries: I, sort_rows: bool) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let rows = entries
        .into_iter()
        .map(|(key, value)| vec![key.into(), value.into()])
        .collect();
    render_table(&KEY_VALUE_HEADERS, rows, sort_rows)
}

fn first_cell(row: &[String]) -> &str {
    row.first().map_or("", String::as_str)
}
