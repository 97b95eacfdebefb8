//! An in-memory search provider over a fixed list of entries.
//!
//! Matching is multi-token fuzzy matching: the query is split on whitespace,
//! lowercased, and every token must fuzzy-match the entry. An empty query
//! lists everything.

use super::collaborators::{FilterAware, SearchContentProvider};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Searchable directory of display names.
///
/// # Example
///
/// ```rust
/// use dialnav::nav::{DirectorySearch, SearchContentProvider};
///
/// let mut search = DirectorySearch::new(["Ada Lovelace", "Alan Turing", "Grace Hopper"]);
/// search.set_query_string("al tu", true);
/// assert_eq!(search.results(), ["Alan Turing"]);
///
/// search.set_query_string("", true);
/// assert_eq!(search.results().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySearch {
    entries: Vec<String>,
    query: String,
    account: Option<String>,
    results: Vec<String>,
}

impl DirectorySearch {
    /// Creates a directory over `entries`, initially unfiltered.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();
        Self {
            results: entries.clone(),
            entries,
            query: String::new(),
            account: None,
        }
    }

    /// Entries matching the current query.
    #[must_use]
    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// The last query pushed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The last list filter pushed, if any.
    #[must_use]
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    fn refresh(&mut self) {
        let tokens: Vec<String> = self.query.split_whitespace().map(str::to_lowercase).collect();

        if tokens.is_empty() {
            self.results.clone_from(&self.entries);
            return;
        }

        let matcher = SkimMatcherV2::default();
        self.results = self
            .entries
            .iter()
            .filter(|entry| {
                let lowered = entry.to_lowercase();
                tokens.iter().all(|token| matcher.fuzzy_match(&lowered, token).is_some())
            })
            .cloned()
            .collect();

        tracing::trace!(query = %self.query, matches = self.results.len(), "directory filtered");
    }
}

impl SearchContentProvider for DirectorySearch {
    fn set_query_string(&mut self, text: &str, immediate: bool) {
        self.query = text.to_string();
        if immediate {
            self.refresh();
        }
    }

    fn list_filter(&mut self) -> Option<&mut dyn FilterAware> {
        Some(self)
    }
}

impl FilterAware for DirectorySearch {
    fn set_filter_text(&mut self, filter: &str) {
        self.account = Some(filter.to_string());
    }
}
