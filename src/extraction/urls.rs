//! Reference resolution against a page URL
//!
//! Resolution never fails. A reference that cannot be turned into an absolute
//! URL yields `None` and the caller drops it.

use tracing::debug;
use url::Url;

/// Scheme assumed for base URLs typed without one
const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Prepend `https://` when the input has no `scheme://` prefix.
///
/// This is a textual heuristic, not a network operation: `example.com/a`
/// becomes `https://example.com/a`, `http://x` is left alone.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim();
    if has_scheme_prefix(trimmed) {
        trimmed.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, trimmed.trim_start_matches('/'))
    }
}

fn has_scheme_prefix(input: &str) -> bool {
    match input.find("://") {
        Some(idx) if idx > 0 => {
            let scheme = &input[..idx];
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// Resolves references found in a page against that page's URL
#[derive(Debug, Clone)]
pub struct UrlResolver {
    base: Option<Url>,
}

impl UrlResolver {
    /// Create a resolver for the given page URL.
    ///
    /// A base that still fails to parse after normalization is kept as
    /// `None`: absolute references keep working, relative ones are dropped.
    pub fn new(base: &str) -> Self {
        let normalized = normalize_base(base);
        let base = match Url::parse(&normalized) {
            Ok(url) => Some(url),
            Err(e) => {
                debug!("Unusable base URL {:?}: {}", base, e);
                None
            }
        };
        Self { base }
    }

    /// The normalized base, if it parsed
    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// Resolve `reference` to an absolute URL.
    ///
    /// Surrounding whitespace is trimmed first, as browsers do for `src` and
    /// `href`. Past that, absolute references come back unchanged. Relative
    /// ones (scheme relative, absolute path, relative path, query or fragment
    /// only) are joined onto the base.
    pub fn resolve(&self, reference: &str) -> Option<String> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }

        if Url::parse(reference).is_ok() {
            return Some(reference.to_string());
        }

        let base = self.base.as_ref()?;
        match base.join(reference) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                debug!("Dropping unresolvable reference {:?}: {}", reference, e);
                None
            }
        }
    }
}

/// One-off resolution of `reference` against `base`
pub fn resolve(base: &str, reference: &str) -> Option<String> {
    UrlResolver::new(base).resolve(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_reference_unchanged() {
        let abs = "http://other.org/x?y=1#z";
        assert_eq!(resolve("https://example.com/a/b", abs).as_deref(), Some(abs));
        assert_eq!(
            resolve("https://example.com", "mailto:me@example.com").as_deref(),
            Some("mailto:me@example.com")
        );
    }

    #[test]
    fn test_relative_forms() {
        let base = "https://example.com/dir/page.html?q=1";
        assert_eq!(
            resolve(base, "//cdn.example.net/i.png").as_deref(),
            Some("https://cdn.example.net/i.png")
        );
        assert_eq!(
            resolve(base, "/root.png").as_deref(),
            Some("https://example.com/root.png")
        );
        assert_eq!(
            resolve(base, "img/a.png").as_deref(),
            Some("https://example.com/dir/img/a.png")
        );
        assert_eq!(
            resolve(base, "../up.png").as_deref(),
            Some("https://example.com/up.png")
        );
        assert_eq!(
            resolve(base, "?page=2").as_deref(),
            Some("https://example.com/dir/page.html?page=2")
        );
        assert_eq!(
            resolve(base, "#top").as_deref(),
            Some("https://example.com/dir/page.html?q=1#top")
        );
    }

    #[test]
    fn test_scheme_less_base_gets_https() {
        assert_eq!(normalize_base("example.com/a"), "https://example.com/a");
        assert_eq!(normalize_base("  http://example.com "), "http://example.com");
        assert_eq!(normalize_base("//example.com"), "https://example.com");
        assert_eq!(
            resolve("example.com/dir/", "x.png").as_deref(),
            Some("https://example.com/dir/x.png")
        );
    }

    #[test]
    fn test_absolute_reference_only_trimmed() {
        assert_eq!(
            resolve("https://example.com", "  https://x.example/a b?c \n").as_deref(),
            Some("https://x.example/a b?c")
        );
    }

    #[test]
    fn test_empty_reference_dropped() {
        assert!(resolve("https://example.com", "").is_none());
        assert!(resolve("https://example.com", "   ").is_none());
    }

    #[test]
    fn test_unusable_base_drops_relative_only() {
        let resolver = UrlResolver::new("https://exa mple.com");
        assert!(resolver.base().is_none());
        assert!(resolver.resolve("/a").is_none());
        assert_eq!(
            resolver.resolve("https://ok.example/").as_deref(),
            Some("https://ok.example/")
        );
    }
}
