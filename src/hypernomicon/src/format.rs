use std::fmt::Display;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL_CONDENSED};
use comfy_table::{ContentArrangement, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStyle {
    #[default]
    Ascii,
    Markdown,
}

pub fn as_table<T, U, V, W>(style: TableStyle, headers: T, rows: U) -> String
where
    T: IntoIterator,
    T::Item: AsRef<str> + Display,
    U: IntoIterator<Item = V>,
    V: IntoIterator<Item = W>,
    W: AsRef<str> + Display,
{
    let mut table = Table::new();
    match style {
        TableStyle::Ascii => table
            .load_preset(UTF8_FULL_CONDENSED)
            .apply_modifier(UTF8_ROUND_CORNERS),
        TableStyle::Markdown => table.load_preset(ASCII_MARKDOWN),
    };
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table.add_rows(rows);
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_table_contains_cells() {
        let table = as_table(TableStyle::Ascii, ["Id", "Name"], vec![vec!["1", "Free Will"]]);
        assert!(table.contains("Free Will"));
        assert!(table.contains("Id"));
    }

    #[test]
    fn test_markdown_table_rows() {
        let table = as_table(
            TableStyle::Markdown,
            ["Id", "Name"],
            vec![vec!["1", "Free Will"]],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with('|'));
        assert!(lines[2].contains("Free Will"));
    }
}
