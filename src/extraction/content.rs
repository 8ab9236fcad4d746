//! Page content extraction
//!
//! This module walks a parsed page and produces a [`Document`]. Every
//! category degrades to an empty value (or the `"No Title"` placeholder)
//! when the page lacks it; extraction itself cannot fail.

use super::node::{descendants_by_tag, first_by_tag, MarkupNode};
use super::tables::TableParser;
use super::urls::UrlResolver;
use crate::document::{Document, NO_TITLE};
use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A document plus the raw markup of each of its tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// The normalized document
    pub document: Document,
    /// Serialized `<table>` markup, index-aligned with `document.tables()`
    pub tables_html: Vec<String>,
}

/// Content extraction functionality
pub struct ContentExtractor;

impl ContentExtractor {
    /// Parse `html` and extract its content, resolving URLs against `base_url`
    #[instrument(skip(html), fields(html_len = html.len()))]
    pub fn extract_html(html: &str, base_url: &str) -> Extraction {
        let parsed = Html::parse_document(html);
        Self::extract_with_markup(&parsed.root_element(), base_url)
    }

    /// Extract a [`Document`] from an already parsed tree
    pub fn extract<N: MarkupNode>(root: &N, base_url: &str) -> Document {
        Self::extract_with_markup(root, base_url).document
    }

    /// Extract a [`Document`] and keep each table's markup on the side
    pub fn extract_with_markup<N: MarkupNode>(root: &N, base_url: &str) -> Extraction {
        let resolver = UrlResolver::new(base_url);

        let title = Self::title(root);
        let paragraphs = Self::paragraphs(root);
        let images = Self::resolved_attributes(root, "img", "src", &resolver);
        let links = Self::resolved_attributes(root, "a", "href", &resolver);

        let (tables, tables_html): (Vec<_>, Vec<_>) = TableParser::parse_tables(root)
            .into_iter()
            .map(|parsed| (parsed.table, parsed.html))
            .unzip();

        info!(
            "Extracted {} paragraphs, {} images, {} links, {} tables",
            paragraphs.len(),
            images.len(),
            links.len(),
            tables.len()
        );

        Extraction {
            document: Document::new(title, paragraphs, images, links, tables),
            tables_html,
        }
    }

    /// Trimmed text of the first `<title>`, or the placeholder
    pub fn title<N: MarkupNode>(root: &N) -> String {
        first_by_tag(root, "title")
            .map(|t| t.text().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string())
    }

    /// Trimmed text of every non-blank `<p>`
    pub fn paragraphs<N: MarkupNode>(root: &N) -> Vec<String> {
        descendants_by_tag(root, "p")
            .iter()
            .map(|p| p.text().trim().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// Resolved values of `attr` on every `tag` element that carries it.
    ///
    /// Elements without the attribute, with an empty value, or whose value
    /// cannot be resolved produce nothing.
    fn resolved_attributes<N: MarkupNode>(
        root: &N,
        tag: &str,
        attr: &str,
        resolver: &UrlResolver,
    ) -> Vec<String> {
        let mut skipped = 0usize;
        let urls: Vec<String> = descendants_by_tag(root, tag)
            .iter()
            .filter_map(|el| el.attribute(attr))
            .filter_map(|value| {
                let resolved = resolver.resolve(value);
                if resolved.is_none() {
                    skipped += 1;
                }
                resolved
            })
            .collect();

        if skipped > 0 {
            debug!("Skipped {} unresolvable <{} {}> values", skipped, tag, attr);
        }
        urls
    }
}
