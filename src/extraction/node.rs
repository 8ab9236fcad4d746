//! Parser-independent view of a markup tree
//!
//! Extraction is written against [`MarkupNode`] only, so the same functions
//! run over a `scraper` DOM or any other tree that can answer these questions.

use scraper::ElementRef;

/// An element in a parsed markup tree
pub trait MarkupNode: Sized + Clone {
    /// Lowercase tag name
    fn tag_name(&self) -> &str;

    /// Attribute value, if present
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Concatenated text of every descendant text node, untrimmed
    fn text(&self) -> String;

    /// Element children in source order
    fn children(&self) -> Vec<Self>;

    /// Serialized markup of this element, tags included
    fn outer_html(&self) -> String;

    /// Whether this element has the given tag name (ASCII case-insensitive)
    fn is(&self, tag: &str) -> bool {
        self.tag_name().eq_ignore_ascii_case(tag)
    }
}

/// Every descendant element (self excluded) with the given tag, depth-first
/// in source order.
///
/// The walk keeps its own stack, so nesting depth is bounded by memory only.
pub fn descendants_by_tag<N: MarkupNode>(node: &N, tag: &str) -> Vec<N> {
    let mut found = Vec::new();
    let mut stack: Vec<N> = node.children().into_iter().rev().collect();

    while let Some(current) = stack.pop() {
        if current.is(tag) {
            found.push(current.clone());
        }
        // Reversed so the first child is popped first
        stack.extend(current.children().into_iter().rev());
    }
    found
}

/// First element with the given tag in document order, the node itself included
pub fn first_by_tag<N: MarkupNode>(node: &N, tag: &str) -> Option<N> {
    let mut stack = vec![node.clone()];

    while let Some(current) = stack.pop() {
        if current.is(tag) {
            return Some(current);
        }
        stack.extend(current.children().into_iter().rev());
    }
    None
}

impl<'a> MarkupNode for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn children(&self) -> Vec<Self> {
        // NodeRef::children, reached through Deref
        (**self).children().filter_map(ElementRef::wrap).collect()
    }

    fn outer_html(&self) -> String {
        self.html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_descendants_in_source_order() {
        let html = Html::parse_document(
            "<body><div><p>one</p><section><p>two</p></section></div><p>three</p></body>",
        );
        let paragraphs = descendants_by_tag(&html.root_element(), "p");
        let texts: Vec<String> = paragraphs.iter().map(MarkupNode::text).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_descendants_excludes_self() {
        let html = Html::parse_fragment("<div><div>inner</div></div>");
        let root = html.root_element();
        let outer = first_by_tag(&root, "div").unwrap();
        assert_eq!(descendants_by_tag(&outer, "div").len(), 1);
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let depth = 20_000;
        let markup = format!(
            "<html><body>{}<p>deep</p><span>x</span>{}</body></html>",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let html = Html::parse_document(&markup);
        let root = html.root_element();

        let paragraphs = descendants_by_tag(&root, "p");
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(MarkupNode::text(&paragraphs[0]), "deep");
        assert_eq!(descendants_by_tag(&root, "div").len(), depth);
        assert!(first_by_tag(&root, "span").is_some());
    }

    #[test]
    fn test_first_by_tag_prefers_document_order() {
        let html = Html::parse_document(
            "<body><div><section><b>first</b></section></div><b>second</b></body>",
        );
        let b = first_by_tag(&html.root_element(), "b").unwrap();
        assert_eq!(MarkupNode::text(&b), "first");
    }

    #[test]
    fn test_first_by_tag_missing() {
        let html = Html::parse_document("<p>no title here</p>");
        assert!(first_by_tag(&html.root_element(), "title").is_none());
    }

    #[test]
    fn test_text_includes_nested_markup() {
        let html = Html::parse_fragment("<p> Hello <b>bold</b> world </p>");
        let p = first_by_tag(&html.root_element(), "p").unwrap();
        assert_eq!(MarkupNode::text(&p), " Hello bold world ");
        assert_eq!(p.attribute("class"), None);
        assert!(p.outer_html().starts_with("<p>"));
    }
}
