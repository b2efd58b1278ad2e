//! Result deduplication by URL, falling back to normalised title.
//!
//! The first occurrence of each key wins, in merge order, even when the
//! duplicate comes from a different provider. Output order is the input order
//! minus the dropped duplicates, so the later stable sort sees merge order
//! for ties.

use std::collections::HashSet;

use crate::text::normalize_title;
use crate::types::ResultItem;

use super::url_normalize::normalize_url;

/// Identity used to collapse duplicates: the normalised URL when the item
/// has one, otherwise the normalised title.
pub fn dedup_key(item: &ResultItem) -> String {
    match item.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => format!("url:{}", normalize_url(url)),
        None => format!("title:{}", normalize_title(&item.title)),
    }
}

/// Drop every item whose key was already seen earlier in `items`.
pub fn deduplicate(items: Vec<ResultItem>) -> Vec<ResultItem> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(dedup_key(item)))
        .collect()
}
