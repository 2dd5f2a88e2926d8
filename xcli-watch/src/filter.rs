//! Keyword filtering.

/// Case-insensitive substring filter with OR semantics.
///
/// An empty filter passes everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    keywords: Vec<String>,
    lowered: Vec<String>,
}

impl KeywordFilter {
    /// Creates a filter from the given keywords.
    pub fn new(keywords: Vec<String>) -> Self {
        let lowered = keywords.iter().map(|k| k.to_lowercase()).collect();
        Self { keywords, lowered }
    }

    /// Returns the keywords as given.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Returns true if no keywords are set.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Returns true if `text` contains any keyword, or the filter is empty.
    pub fn matches(&self, text: &str) -> bool {
        if self.lowered.is_empty() {
            return true;
        }
        let text = text.to_lowercase();
        self.lowered.iter().any(|k| text.contains(k.as_str()))
    }
}
