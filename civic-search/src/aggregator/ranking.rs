//! Category filtering and the selectable stable sort.
//!
//! Sort keys:
//! - `relevance`: descending `relevance_score`
//! - `date`: descending timestamp, missing timestamps last
//! - `category`: ascending category name, missing (empty) categories last
//!
//! All three use [`slice::sort_by`], which is stable, so ties keep merge order.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::types::{ResultItem, SortBy};

/// Keep only items whose category matches `category` case-insensitively.
/// `None` keeps everything.
pub fn filter_by_category(items: Vec<ResultItem>, category: Option<&str>) -> Vec<ResultItem> {
    match category {
        Some(wanted) => items
            .into_iter()
            .filter(|item| item.category_matches(wanted))
            .collect(),
        None => items,
    }
}

/// Sort in place by the selected key. Stable.
pub fn sort_results(items: &mut [ResultItem], sort_by: SortBy) {
    match sort_by {
        SortBy::Relevance => items.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score)),
        SortBy::Date => items.sort_by(compare_date_desc),
        SortBy::Category => items.sort_by(compare_category_asc),
    }
}

fn compare_date_desc(a: &ResultItem, b: &ResultItem) -> Ordering {
    match (a.timestamp, b.timestamp) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_category_asc(a: &ResultItem, b: &ResultItem) -> Ordering {
    match (a.category.is_empty(), b.category.is_empty()) {
        (false, false) => a.category.cmp(&b.category),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
}

/// Distinct non-empty categories, sorted.
pub fn distinct_categories(items: &[ResultItem]) -> Vec<String> {
    items
        .iter()
        .filter(|item| !item.category.is_empty())
        .map(|item| item.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
