//! Content extraction module
//!
//! This module turns parsed markup into a [`Document`](crate::Document):
//! title, paragraphs, resolved image and link URLs, and tables. All of it is
//! written as pure functions over the [`MarkupNode`] abstraction.

pub mod content;
pub mod node;
pub mod tables;
pub mod urls;

pub use content::{ContentExtractor, Extraction};
pub use node::{descendants_by_tag, first_by_tag, MarkupNode};
pub use tables::{ParsedTable, TableParser};
pub use urls::{normalize_base, resolve, UrlResolver};
