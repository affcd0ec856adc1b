//! Plain-text table helpers.

use regwatch_analysis::Record;

/// Widest a table cell may render before it is truncated.
const MAX_CELL_CHARS: usize = 40;

/// Shown for missing values.
pub(crate) const MISSING: &str = "\u{2014}";

/// Truncate `text` to `max` characters, appending `...` when cut.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Render `records` as a left-aligned table over `columns`.
///
/// Newlines inside a cell are flattened to spaces; absent fields show as
/// [`MISSING`].
pub(crate) fn render_table(columns: &[String], records: &[Record]) -> Vec<String> {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| {
                    record.text_field(c).map_or_else(
                        || MISSING.to_string(),
                        |v| truncate(&v.replace(['\n', '\r'], " "), MAX_CELL_CHARS),
                    )
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
                + 2
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(join_padded(
        columns.iter().map(|c| c.to_uppercase()),
        &widths,
    ));
    for row in rows {
        lines.push(join_padded(row.into_iter(), &widths));
    }
    lines
}

fn join_padded(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    let mut line = String::new();
    for (cell, width) in cells.zip(widths) {
        line.push_str(&format!("{cell:<width$}"));
    }
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use regwatch_core::Category;
    use serde_json::json;

    use super::*;

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => Record::new(Category::new("CFTC"), map),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn truncate_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefgh", 3), "abc...");
    }

    #[test]
    fn table_pads_columns_and_marks_missing() {
        let columns = vec!["title".to_string(), "date".to_string()];
        let records = vec![
            record(json!({"title": "New Rule", "date": "2024-01-01"})),
            record(json!({"title": "Brief"})),
        ];
        let lines = render_table(&columns, &records);
        assert_eq!(lines[0], "TITLE     DATE");
        assert_eq!(lines[1], "New Rule  2024-01-01");
        assert_eq!(lines[2], format!("Brief     {MISSING}"));
    }

    #[test]
    fn table_flattens_newlines() {
        let columns = vec!["title".to_string()];
        let lines = render_table(&columns, &[record(json!({"title": "line one\nline two"}))]);
        assert_eq!(lines[1], "line one line two");
    }
}
