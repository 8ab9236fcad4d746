//! Bounded preview of an extraction
//!
//! A preview shows only the selected categories and only the first few items
//! of each, so a caller can render it without shipping the whole document.

use crate::document::Document;
use crate::selection::{Category, SelectionSet};
use serde::{Deserialize, Serialize};

/// Paragraphs, images and links shown per category
pub const PREVIEW_ITEM_LIMIT: usize = 10;

/// Tables whose markup is included
pub const PREVIEW_TABLE_LIMIT: usize = 3;

/// A truncated list plus the size of the full list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewList {
    /// First items, at most the preview limit
    pub items: Vec<String>,
    /// Number of items in the full document
    pub total: usize,
}

impl PreviewList {
    fn from_slice(all: &[String], limit: usize) -> Self {
        Self {
            items: all.iter().take(limit).cloned().collect(),
            total: all.len(),
        }
    }

    /// Whether the full list was empty
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Selection-filtered summary of a document
///
/// Unselected categories are `None` and are left out of the JSON form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    /// Page title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Leading paragraphs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<PreviewList>,
    /// Leading image URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<PreviewList>,
    /// Leading link URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PreviewList>,
    /// Markup of the leading tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<PreviewList>,
}

impl Preview {
    /// Build a preview of `document` for the categories in `selection`.
    ///
    /// `tables_html` is the raw markup of each table, index-aligned with
    /// `document.tables()`.
    pub fn build(document: &Document, tables_html: &[String], selection: &SelectionSet) -> Self {
        let list = |category: Category, all: &[String], limit: usize| {
            selection
                .contains(category)
                .then(|| PreviewList::from_slice(all, limit))
        };

        Self {
            title: selection
                .contains(Category::Title)
                .then(|| document.title().to_string()),
            paragraphs: list(Category::Paragraphs, document.paragraphs(), PREVIEW_ITEM_LIMIT),
            images: list(Category::Images, document.images(), PREVIEW_ITEM_LIMIT),
            links: list(Category::Links, document.links(), PREVIEW_ITEM_LIMIT),
            tables: list(Category::Tables, tables_html, PREVIEW_TABLE_LIMIT),
        }
    }

    /// Message to show for a selected category that came back empty,
    /// e.g. `"No paragraphs found."`
    pub fn empty_message(category: Category) -> String {
        format!("No {} found.", category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn many(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}{}", prefix, i)).collect()
    }

    #[test]
    fn test_preview_limits() {
        let doc = Document::new(
            "T",
            many("p", 25),
            many("https://i/", 3),
            many("https://l/", 12),
            vec![],
        );
        let tables_html = many("<table>", 5);

        let preview = Preview::build(&doc, &tables_html, &SelectionSet::all());
        assert_eq!(preview.title.as_deref(), Some("T"));

        let paragraphs = preview.paragraphs.unwrap();
        assert_eq!(paragraphs.items.len(), 10);
        assert_eq!(paragraphs.total, 25);
        assert_eq!(paragraphs.items[0], "p0");

        assert_eq!(preview.images.unwrap().items.len(), 3);
        assert_eq!(preview.links.unwrap().items.len(), 10);

        let tables = preview.tables.unwrap();
        assert_eq!(tables.items.len(), 3);
        assert_eq!(tables.total, 5);
    }

    #[test]
    fn test_preview_respects_selection() {
        let doc = Document::new("T", many("p", 2), vec![], vec![], vec![]);
        let selection: SelectionSet = "images".parse().unwrap();

        let preview = Preview::build(&doc, &[], &selection);
        assert!(preview.title.is_none());
        assert!(preview.paragraphs.is_none());
        assert!(preview.images.as_ref().unwrap().is_empty());

        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json, serde_json::json!({ "images": { "items": [], "total": 0 } }));
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(Preview::empty_message(Category::Paragraphs), "No paragraphs found.");
    }
}
