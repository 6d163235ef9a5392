//! Document selection predicates for a client session.

use lsp_types::Uri;

/// Matches documents by URI scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFilter {
    scheme: String,
}

impl DocumentFilter {
    /// Builds a filter accepting a single URI scheme.
    #[must_use]
    pub fn scheme(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into().to_ascii_lowercase(),
        }
    }

    /// Whether the URI carries this filter's scheme.
    #[must_use]
    pub fn matches(&self, uri: &Uri) -> bool {
        uri.as_str()
            .split_once(':')
            .is_some_and(|(scheme, _)| scheme.eq_ignore_ascii_case(&self.scheme))
    }
}

/// Ordered list of filters; a document matches when any filter accepts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSelector {
    filters: Vec<DocumentFilter>,
}

impl DocumentSelector {
    /// Builds a selector from explicit filters.
    #[must_use]
    pub fn new(filters: Vec<DocumentFilter>) -> Self {
        Self { filters }
    }

    /// Selector accepting every document with a local-file origin.
    #[must_use]
    pub fn file_documents() -> Self {
        Self::new(vec![DocumentFilter::scheme("file")])
    }

    /// Whether any filter accepts the URI.
    #[must_use]
    pub fn matches(&self, uri: &Uri) -> bool {
        self.filters.iter().any(|filter| filter.matches(uri))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    fn uri(text: &str) -> Uri {
        Uri::from_str(text).expect("invalid test uri")
    }

    #[rstest]
    #[case("file:///workspace/main.ekam", true)]
    #[case("FILE:///workspace/main.ekam", true)]
    #[case("untitled:Untitled-1", false)]
    #[case("vscode-vfs://github/repo/main.ekam", false)]
    fn file_selector_accepts_only_file_scheme(#[case] input: &str, #[case] expected: bool) {
        let selector = DocumentSelector::file_documents();

        assert_eq!(selector.matches(&uri(input)), expected);
    }

    #[rstest]
    fn selector_matches_when_any_filter_does() {
        let selector = DocumentSelector::new(vec![
            DocumentFilter::scheme("untitled"),
            DocumentFilter::scheme("file"),
        ]);

        assert!(selector.matches(&uri("file:///a.ekam")));
        assert!(selector.matches(&uri("untitled:Untitled-1")));
        assert!(!selector.matches(&uri("http://example.com/a.ekam")));
    }

    #[rstest]
    fn empty_selector_matches_nothing() {
        let selector = DocumentSelector::new(Vec::new());

        assert!(!selector.matches(&uri("file:///a.ekam")));
    }
}
