use std::ops::Range;

use crate::{ProductRecord, Status, StatusFilter};

/// Queries this short (in characters) never filter nor highlight.
pub const MIN_QUERY_CHARS: usize = 2;

/// Active status restriction plus free-text query.
///
/// The two are mutually exclusive modes: every transition that sets one
/// clears the other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    status: StatusFilter,
    query: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the query is long enough to take effect.
    pub fn has_effective_query(&self) -> bool {
        self.query.chars().count() >= MIN_QUERY_CHARS
    }

    pub fn set_status_filter(&self, status: StatusFilter) -> Self {
        Self {
            status,
            query: String::new(),
        }
    }

    pub fn set_search_query(&self, query: impl Into<String>) -> Self {
        Self {
            status: StatusFilter::All,
            query: query.into(),
        }
    }

    pub fn select_category(&self, category: &str) -> Self {
        self.set_search_query(category)
    }

    /// Chart segment click: re-clicking the active status resets to all.
    pub fn toggle_segment(&self, status: Status) -> Self {
        let next = if self.status == StatusFilter::Only(status) {
            StatusFilter::All
        } else {
            StatusFilter::Only(status)
        };
        self.set_status_filter(next)
    }

    pub fn reset(&self) -> Self {
        Self::default()
    }

    pub fn matches(&self, record: &ProductRecord) -> bool {
        if !self.status.admits(record.status) {
            return false;
        }
        if !self.has_effective_query() {
            return true;
        }
        let needle = fold_case(&self.query);
        find_folded(&record.name, &needle).next().is_some()
            || find_folded(&record.category, &needle).next().is_some()
    }
}

/// Records admitted by `state`, in their original order.
pub fn filter_records<'a>(records: &'a [ProductRecord], state: &FilterState) -> Vec<&'a ProductRecord> {
    records.iter().filter(|record| state.matches(record)).collect()
}

/// Byte ranges of case-insensitive, non-overlapping occurrences of `query`
/// in `text`. The query is matched literally, with the same folding that
/// decides whether a record matches at all.
pub fn highlight_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }
    find_folded(text, &fold_case(query)).collect()
}

fn fold_case(text: &str) -> Vec<char> {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Occurrences of the already folded `needle`, left to right. A match
/// always covers whole characters of `text`.
fn find_folded<'a>(text: &'a str, needle: &'a [char]) -> impl Iterator<Item = Range<usize>> + 'a {
    let mut cursor = 0;
    text.char_indices().filter_map(move |(start, _)| {
        if start < cursor {
            return None;
        }
        let len = match_len_at(&text[start..], needle)?;
        cursor = start + len;
        Some(start..start + len)
    })
}

/// Byte length of the prefix of `haystack` that lowercases to `needle`.
fn match_len_at(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, ch) in haystack.char_indices() {
        if matched == needle.len() {
            return Some(offset);
        }
        for lower in ch.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
    }
    (matched == needle.len()).then_some(haystack.len())
}
