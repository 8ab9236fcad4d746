//! Normalized content model
//!
//! A [`Document`] is produced fresh by every extraction call and is never
//! mutated afterwards. Its fields are only readable through accessors.

use serde::{Deserialize, Serialize};

/// Placeholder used when a page has no usable `<title>`
pub const NO_TITLE: &str = "No Title";

/// Header/row structure extracted from one markup table
///
/// Rows are ragged: a row may be shorter or longer than `headers` and than
/// its neighbours. Nothing is padded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Header cell texts from the table's first row
    pub headers: Vec<String>,
    /// Data cell texts for every row after the first
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from headers and rows
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }
}

/// The normalized result of extracting one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    title: String,
    paragraphs: Vec<String>,
    images: Vec<String>,
    links: Vec<String>,
    tables: Vec<Table>,
}

impl Document {
    /// Assemble a document from already-normalized parts.
    ///
    /// An empty or whitespace-only title becomes [`NO_TITLE`] and blank
    /// paragraphs are dropped, so the model invariants hold no matter
    /// where the parts came from.
    pub fn new(
        title: impl Into<String>,
        paragraphs: Vec<String>,
        images: Vec<String>,
        links: Vec<String>,
        tables: Vec<Table>,
    ) -> Self {
        let title = title.into();
        let title = match title.trim() {
            "" => NO_TITLE.to_string(),
            trimmed => trimmed.to_string(),
        };

        Self {
            title,
            paragraphs: paragraphs
                .into_iter()
                .filter(|p| !p.trim().is_empty())
                .collect(),
            images,
            links,
            tables,
        }
    }

    /// Page title, or [`NO_TITLE`]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Non-empty paragraph texts in document order
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// Absolute image URLs in document order
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Absolute link URLs in document order
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Extracted tables in document order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Whether the document carries anything besides its title
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
            && self.images.is_empty()
            && self.links.is_empty()
            && self.tables.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(NO_TITLE, Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document() {
        let doc = Document::default();
        assert_eq!(doc.title(), NO_TITLE);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_blank_title_becomes_placeholder() {
        let doc = Document::new("   ", vec![], vec![], vec![], vec![]);
        assert_eq!(doc.title(), "No Title");
    }

    #[test]
    fn test_blank_paragraphs_dropped() {
        let doc = Document::new(
            "T",
            vec!["A".to_string(), "".to_string(), " \n ".to_string(), "B".to_string()],
            vec![],
            vec![],
            vec![],
        );
        assert_eq!(doc.paragraphs(), ["A", "B"]);
    }

    #[test]
    fn test_document_serialization() {
        let doc = Document::new(
            "Hi",
            vec!["A".to_string()],
            vec![],
            vec!["https://example.com/".to_string()],
            vec![Table::new(vec!["H".to_string()], vec![vec!["1".to_string()]])],
        );

        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"title\":\"Hi\""));
        assert!(json.contains("\"headers\":[\"H\"]"));

        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}
