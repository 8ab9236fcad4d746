//! Spreadsheet export
//!
//! The builder works in two steps. [`WorkbookBuilder::layout`] computes every
//! sheet and cell from a [`Document`] and a [`SelectionSet`]; this is the part
//! that must be deterministic. [`WorkbookBuilder::build`] then serializes that
//! layout to xlsx bytes with `rust_xlsxwriter`.
//!
//! # Primary sheet layout
//!
//! ```text
//!      A            B
//!  1   Title        <title>
//!  2
//!  3   Paragraphs
//!  4                <paragraph 1>
//!  5                <paragraph 2>
//!  6
//!  7   Images
//!  8
//!  9   Links
//! 10                <link 1>
//! ```
//!
//! Tables never appear on the primary sheet; each one gets a `Table {i}` sheet.

use crate::document::Document;
use crate::error::BuildError;
use crate::selection::{Category, SelectionSet};
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Name of the sheet holding title, paragraphs, images and links
pub const MAIN_SHEET_NAME: &str = "Main Content";

/// Longest string an xlsx cell accepts
pub const MAX_CELL_CHARS: usize = 32_767;

/// Sheet name for the table at 1-based `index`
pub fn table_sheet_name(index: usize) -> String {
    format!("Table {}", index)
}

/// One written cell, addressed with 1-based row and column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellWrite {
    /// 1-based row
    pub row: u32,
    /// 1-based column
    pub col: u32,
    /// Cell text
    pub value: String,
}

/// Cells of one sheet in write order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    /// Sheet name
    pub name: String,
    /// Cells in write order
    pub cells: Vec<CellWrite>,
}

impl SheetLayout {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: Vec::new(),
        }
    }

    fn write(&mut self, row: u32, col: u32, value: &str) {
        self.cells.push(CellWrite {
            row,
            col,
            value: value.to_string(),
        });
    }

    /// Value at a 1-based position, if written
    pub fn get(&self, row: u32, col: u32) -> Option<&str> {
        self.cells
            .iter()
            .rev()
            .find(|c| c.row == row && c.col == col)
            .map(|c| c.value.as_str())
    }

    /// Highest row holding a cell (0 when the sheet is empty)
    pub fn last_row(&self) -> u32 {
        self.cells.iter().map(|c| c.row).max().unwrap_or(0)
    }
}

/// Every sheet of a workbook, primary sheet first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookLayout {
    /// Sheets in workbook order
    pub sheets: Vec<SheetLayout>,
}

impl WorkbookLayout {
    /// Look a sheet up by name
    pub fn sheet(&self, name: &str) -> Option<&SheetLayout> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Workbook building functionality
pub struct WorkbookBuilder;

impl WorkbookBuilder {
    /// Compute the sheets and cells for `document` restricted to `selection`
    pub fn layout(document: &Document, selection: &SelectionSet) -> WorkbookLayout {
        let mut sheets = vec![Self::main_sheet(document, selection)];

        if selection.contains(Category::Tables) {
            for (i, table) in document.tables().iter().enumerate() {
                let mut sheet = SheetLayout::new(table_sheet_name(i + 1));

                let mut row = 1u32;
                if !table.headers.is_empty() {
                    for (col, header) in (1u32..).zip(&table.headers) {
                        sheet.write(row, col, header);
                    }
                    row += 1;
                }

                for data in &table.rows {
                    for (col, cell) in (1u32..).zip(data) {
                        sheet.write(row, col, cell);
                    }
                    row += 1;
                }

                sheets.push(sheet);
            }
        }

        WorkbookLayout { sheets }
    }

    fn main_sheet(document: &Document, selection: &SelectionSet) -> SheetLayout {
        let mut sheet = SheetLayout::new(MAIN_SHEET_NAME);
        let mut row = 1u32;

        if selection.contains(Category::Title) {
            sheet.write(row, 1, Category::Title.label());
            sheet.write(row, 2, document.title());
            row += 2;
        }

        let lists = [
            (Category::Paragraphs, document.paragraphs()),
            (Category::Images, document.images()),
            (Category::Links, document.links()),
        ];

        for (category, items) in lists {
            if !selection.contains(category) {
                continue;
            }
            sheet.write(row, 1, category.label());
            for item in items {
                row += 1;
                sheet.write(row, 2, item);
            }
            row += 2;
        }

        sheet
    }

    /// Build xlsx bytes for `document` restricted to `selection`
    #[instrument(skip_all, fields(selection = %selection))]
    pub fn build(document: &Document, selection: &SelectionSet) -> Result<Vec<u8>, BuildError> {
        let layout = Self::layout(document, selection);
        Self::serialize(&layout)
    }

    /// Serialize a computed layout to xlsx bytes
    pub fn serialize(layout: &WorkbookLayout) -> Result<Vec<u8>, BuildError> {
        let mut workbook = Workbook::new();

        for sheet in &layout.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet.name.as_str())?;

            for cell in &sheet.cells {
                // rust_xlsxwriter is 0-indexed
                let row = cell.row.saturating_sub(1);
                let col = u16::try_from(cell.col.saturating_sub(1)).map_err(|_| {
                    BuildError::Xlsx(format!("column {} is beyond the sheet width", cell.col))
                })?;
                worksheet.write_string(row, col, clamp_cell_text(&cell.value))?;
            }
        }

        let bytes = workbook.save_to_buffer()?;
        debug!(
            "Serialized {} sheets into {} bytes",
            layout.sheets.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

/// Truncate text to the xlsx cell limit on a char boundary
fn clamp_cell_text(value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((byte_idx, _)) => {
            warn!(
                "Cell text of {} chars truncated to {}",
                value.chars().count(),
                MAX_CELL_CHARS
            );
            &value[..byte_idx]
        }
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Table;
    use pretty_assertions::assert_eq;

    fn s(v: &str) -> String {
        v.to_string()
    }

    fn sample() -> Document {
        Document::new(
            "Hi",
            vec![s("A"), s("B")],
            vec![s("https://example.com/i.png")],
            vec![],
            vec![
                Table::new(vec![s("H")], vec![vec![s("1")]]),
                Table::new(vec![], vec![vec![s("x"), s("y")], vec![s("z")]]),
            ],
        )
    }

    #[test]
    fn test_main_sheet_full_layout() {
        let layout = WorkbookBuilder::layout(&sample(), &SelectionSet::all());
        let main = &layout.sheets[0];
        assert_eq!(main.name, "Main Content");

        assert_eq!(main.get(1, 1), Some("Title"));
        assert_eq!(main.get(1, 2), Some("Hi"));
        assert_eq!(main.get(3, 1), Some("Paragraphs"));
        assert_eq!(main.get(4, 2), Some("A"));
        assert_eq!(main.get(5, 2), Some("B"));
        assert_eq!(main.get(7, 1), Some("Images"));
        assert_eq!(main.get(8, 2), Some("https://example.com/i.png"));
        assert_eq!(main.get(10, 1), Some("Links"));
        assert_eq!(main.last_row(), 10);
    }

    #[test]
    fn test_unselected_categories_do_not_advance() {
        let selection: SelectionSet = "links".parse().unwrap();
        let doc = Document::new("T", vec![s("p")], vec![], vec![s("https://a.example/")], vec![]);
        let layout = WorkbookBuilder::layout(&doc, &selection);
        let main = &layout.sheets[0];
        assert_eq!(main.get(1, 1), Some("Links"));
        assert_eq!(main.get(2, 2), Some("https://a.example/"));
        assert_eq!(main.cells.len(), 2);
    }

    #[test]
    fn test_table_sheets() {
        let layout = WorkbookBuilder::layout(&sample(), &SelectionSet::all());
        assert_eq!(layout.sheet_names(), vec!["Main Content", "Table 1", "Table 2"]);

        let t1 = layout.sheet("Table 1").unwrap();
        assert_eq!(t1.get(1, 1), Some("H"));
        assert_eq!(t1.get(2, 1), Some("1"));

        // no headers: rows start at row 1, ragged lengths kept
        let t2 = layout.sheet("Table 2").unwrap();
        assert_eq!(t2.get(1, 1), Some("x"));
        assert_eq!(t2.get(1, 2), Some("y"));
        assert_eq!(t2.get(2, 1), Some("z"));
        assert_eq!(t2.get(2, 2), None);
    }

    #[test]
    fn test_tables_not_selected() {
        let selection: SelectionSet = "title,paragraphs".parse().unwrap();
        let layout = WorkbookBuilder::layout(&sample(), &selection);
        assert_eq!(layout.sheet_names(), vec!["Main Content"]);
    }

    #[test]
    fn test_empty_selection_still_has_main_sheet() {
        let layout = WorkbookBuilder::layout(&sample(), &SelectionSet::new());
        assert_eq!(layout.sheets.len(), 1);
        assert!(layout.sheets[0].cells.is_empty());
    }

    #[test]
    fn test_layout_deterministic() {
        let doc = sample();
        let selection = SelectionSet::all();
        assert_eq!(
            WorkbookBuilder::layout(&doc, &selection),
            WorkbookBuilder::layout(&doc, &selection)
        );
    }

    #[test]
    fn test_build_produces_zip_container() {
        let bytes = WorkbookBuilder::build(&sample(), &SelectionSet::all()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_clamp_cell_text() {
        assert_eq!(clamp_cell_text("short"), "short");

        let long = "é".repeat(MAX_CELL_CHARS + 10);
        let clamped = clamp_cell_text(&long);
        assert_eq!(clamped.chars().count(), MAX_CELL_CHARS);
    }
}
