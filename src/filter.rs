/// Filter Stage
///
/// Keeps the records whose fields contain the search term. Matching is a
/// case-insensitive substring test against the text form of every field
/// value, so `"am"` matches `"Amy"` and `"92"` matches the number `1992`.
/// An empty term matches every record. The input order is preserved.

use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-text search entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTerm {
    raw: String,
}

impl SearchTerm {
    pub fn new(term: impl Into<String>) -> Self {
        SearchTerm { raw: term.into() }
    }

    /// The term as typed
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Build a matcher that folds the term's case once
    pub fn matcher(&self) -> Matcher {
        Matcher {
            needle: self.raw.to_lowercase(),
        }
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for SearchTerm {
    fn from(term: &str) -> Self {
        SearchTerm::new(term)
    }
}

impl From<String> for SearchTerm {
    fn from(term: String) -> Self {
        SearchTerm::new(term)
    }
}

/// Case-folded search term ready for matching
#[derive(Debug, Clone)]
pub struct Matcher {
    needle: String,
}

impl Matcher {
    pub fn matches(&self, record: &Record) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        record
            .values()
            .any(|value| value.to_string().to_lowercase().contains(&self.needle))
    }
}

/// Filter an ordering of buffer indices, keeping the ones whose record
/// matches `term`.
pub fn filter(records: &[Record], ordered: &[usize], term: &SearchTerm) -> Vec<usize> {
    if term.is_empty() {
        return ordered.to_vec();
    }

    let matcher = term.matcher();
    ordered
        .iter()
        .copied()
        .filter(|&index| records.get(index).is_some_and(|record| matcher.matches(record)))
        .collect()
}
