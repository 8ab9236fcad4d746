//! Table extraction
//!
//! Turns every `<table>` into a [`Table`] of header texts and ragged data rows.
//!
//! The first row of a table is never part of `rows`, even when it holds `td`
//! cells rather than `th` cells. Only `th` cells of that first row become
//! headers, and only `td` cells of later rows become data.

use super::node::{descendants_by_tag, MarkupNode};
use crate::document::Table;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A table together with its raw markup
///
/// The markup is only carried for previews and plays no part in the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTable {
    /// Extracted header/row data
    pub table: Table,
    /// Serialized `<table>` element
    pub html: String,
}

/// Table extraction functionality
pub struct TableParser;

impl TableParser {
    /// Parse every table under `root` in document order
    #[instrument(skip_all)]
    pub fn parse_tables<N: MarkupNode>(root: &N) -> Vec<ParsedTable> {
        let mut tables = Vec::new();
        if root.is("table") {
            tables.push(Self::parse_table(root));
        }
        tables.extend(
            descendants_by_tag(root, "table")
                .iter()
                .map(Self::parse_table),
        );

        debug!("Parsed {} tables", tables.len());
        tables
    }

    /// Parse a single `<table>` element
    pub fn parse_table<N: MarkupNode>(table: &N) -> ParsedTable {
        let rows = descendants_by_tag(table, "tr");

        let headers = rows
            .first()
            .map(|first| Self::cell_texts(first, "th"))
            .unwrap_or_default();

        let data = rows
            .iter()
            .skip(1)
            .map(|row| Self::cell_texts(row, "td"))
            .collect();

        ParsedTable {
            table: Table::new(headers, data),
            html: table.outer_html(),
        }
    }

    fn cell_texts<N: MarkupNode>(row: &N, cell_tag: &str) -> Vec<String> {
        descendants_by_tag(row, cell_tag)
            .iter()
            .map(cell_text)
            .collect()
    }
}

/// Visible text of a cell, trimmed at both ends only
pub fn cell_text<N: MarkupNode>(cell: &N) -> String {
    cell.text().trim().to_string()
}
