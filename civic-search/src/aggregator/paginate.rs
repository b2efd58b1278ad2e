//! Page slicing shared by the aggregator and the region services.

use crate::error::SearchError;

/// One page cut from a ranked list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Ranked length capped at the ceiling.
    pub total_results: usize,
    pub total_pages: usize,
    pub has_more: bool,
}

/// Slice `[(page - 1) * limit, (page - 1) * limit + limit)` out of the first
/// `min(items.len(), ceiling)` items.
///
/// # Errors
///
/// Returns [`SearchError::Aggregation`] if `page` or `limit` is zero (the
/// request was not normalised) or the start offset overflows.
pub fn paginate<T>(
    mut items: Vec<T>,
    page: usize,
    limit: usize,
    ceiling: usize,
) -> Result<Page<T>, SearchError> {
    if page == 0 || limit == 0 {
        return Err(SearchError::Aggregation(format!(
            "invalid page window (page {page}, limit {limit})"
        )));
    }
    let start = (page - 1)
        .checked_mul(limit)
        .ok_or_else(|| SearchError::Aggregation(format!("page offset overflow at page {page}")))?;

    let total_results = items.len().min(ceiling);
    items.truncate(total_results);

    let page_items = if start >= total_results {
        Vec::new()
    } else {
        let end = start.saturating_add(limit).min(total_results);
        items.drain(start..end).collect()
    };
    let total_pages = total_results.div_ceil(limit);

    Ok(Page {
        items: page_items,
        total_results,
        total_pages,
        has_more: page < total_pages,
    })
}
