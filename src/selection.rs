//! Export categories and caller selections

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// One exportable part of a [`Document`](crate::Document)
///
/// Declaration order is the fixed export order used on the primary sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Page title
    Title,
    /// Paragraph texts
    Paragraphs,
    /// Image URLs
    Images,
    /// Link URLs
    Links,
    /// Tables (one sheet each)
    Tables,
}

impl Category {
    /// Every category, in export order
    pub const ALL: [Category; 5] = [
        Category::Title,
        Category::Paragraphs,
        Category::Images,
        Category::Links,
        Category::Tables,
    ];

    /// Lowercase identifier used on the wire and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Title => "title",
            Category::Paragraphs => "paragraphs",
            Category::Images => "images",
            Category::Links => "links",
            Category::Tables => "tables",
        }
    }

    /// Human-readable label written into the spreadsheet
    pub fn label(self) -> &'static str {
        match self {
            Category::Title => "Title",
            Category::Paragraphs => "Paragraphs",
            Category::Images => "Images",
            Category::Links => "Links",
            Category::Tables => "Tables",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown category '{}' (expected one of: title, paragraphs, images, links, tables)",
                    s.trim()
                )
            })
    }
}

/// Caller-chosen subset of exportable categories
///
/// Iteration always follows [`Category::ALL`] order, whatever order the
/// categories were inserted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(BTreeSet<Category>);

impl SelectionSet {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection containing every category
    pub fn all() -> Self {
        Category::ALL.into_iter().collect()
    }

    /// Add a category
    pub fn insert(&mut self, category: Category) -> bool {
        self.0.insert(category)
    }

    /// Builder-style insert
    pub fn with(mut self, category: Category) -> Self {
        self.0.insert(category);
        self
    }

    /// Whether the category is selected
    pub fn contains(&self, category: Category) -> bool {
        self.0.contains(&category)
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected categories
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Selected categories in export order
    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Category> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for SelectionSet {
    type Err = String;

    /// Parse a comma separated list such as `"title,tables"`.
    /// Empty segments are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Category::from_str)
            .collect()
    }
}

impl fmt::Display for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Category::as_str).collect();
        f.write_str(&names.join(","))
    }
}
