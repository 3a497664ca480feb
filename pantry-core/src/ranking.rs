//! Ordering and paging search results.

use crate::error::SearchError;
use crate::types::{MatchResult, Page};

/// Sort by match percentage, highest first. The sort is stable, so equal
/// scores keep their dataset order.
pub fn rank(mut results: Vec<MatchResult<'_>>) -> Vec<MatchResult<'_>> {
    results.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
    results
}

/// Slice out 1-indexed page `page` of `page_size` items.
///
/// Pages past the end are empty with `has_more == false`; a zero page number
/// or page size is rejected.
pub fn paginate<T>(results: Vec<T>, page: usize, page_size: usize) -> Result<Page<T>, SearchError> {
    if page == 0 || page_size == 0 {
        return Err(SearchError::InvalidPage);
    }

    let total = results.len();
    let start = (page - 1).checked_mul(page_size).unwrap_or(usize::MAX);
    let end = start.saturating_add(page_size);

    let items: Vec<T> = results.into_iter().skip(start).take(page_size).collect();

    Ok(Page {
        items,
        page,
        page_size,
        total,
        has_more: end < total,
    })
}
