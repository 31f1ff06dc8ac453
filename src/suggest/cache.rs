//! Per-session suggestion cache
//!
//! Memoizes normalized suggestion lists keyed by the exact query string.
//! Append-only for the lifetime of the process: entries are never evicted and
//! a cached query is never fetched again. Query cardinality per session is
//! small, so unbounded growth is acceptable.

use std::collections::HashMap;

use super::suggestion::Suggestion;

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<String, Vec<Suggestion>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a query. Exact string match, no normalization.
    pub fn get(&self, query: &str) -> Option<&[Suggestion]> {
        self.entries.get(query).map(Vec::as_slice)
    }

    #[allow(dead_code)] // Used in tests
    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(query)
    }

    /// Store the suggestions for a query.
    ///
    /// Only successful fetches reach this point; a second insert for the same
    /// query keeps the first entry, since the coordinator never re-fetches a
    /// cached query.
    pub fn insert(&mut self, query: String, suggestions: Vec<Suggestion>) {
        self.entries.entry(query).or_insert(suggestions);
    }

    #[allow(dead_code)] // Used in tests
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
