//! Pagination reconciliation
//!
//! Decides when an expensive total-count refetch is required versus a cheap
//! page refetch, and keeps the current page consistent when the result set
//! shrinks out from under it.

/// The fetch decision for one load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPlan {
    /// Whether the total record count must be re-queried.
    pub needs_count_refetch: bool,
    /// Whether the current page resets to 1 before fetching.
    pub reset_to_first_page: bool,
}

/// Compares the compiled query against the previously executed one.
///
/// A count refetch is needed when the normalized predicate or the page size
/// changed; the page resets to 1 only when the predicate changed. A
/// page-size change alone keeps the current page — it is re-clamped, not
/// reset, once the new total is known. `None` for the previous predicate
/// means the cache was invalidated and always forces a recount.
pub fn reconcile(
    prev_predicate: Option<&str>,
    new_predicate: &str,
    prev_page_size: Option<u32>,
    new_page_size: u32,
) -> FetchPlan {
    let predicate_changed = prev_predicate != Some(new_predicate);
    let page_size_changed = prev_page_size != Some(new_page_size);

    FetchPlan {
        needs_count_refetch: predicate_changed || page_size_changed,
        reset_to_first_page: predicate_changed,
    }
}

/// Total page count for a result set: `max(1, ceil(total / page_size))`.
///
/// Always at least 1, even when the total is 0.
pub fn total_pages(total_records: u64, page_size: u32) -> u64 {
    let page_size = u64::from(page_size.max(1));
    total_records.div_ceil(page_size).max(1)
}

/// Repairs the current page after a count refresh.
///
/// A page beyond the new total clamps to 1, never to the last page — the
/// caller must refetch the page body at offset 0 rather than serve a stale
/// body for an out-of-range page.
pub fn clamp_page(current_page: u64, total_pages: u64) -> u64 {
    if current_page > total_pages {
        1
    } else {
        current_page.max(1)
    }
}

/// Record offset of a 1-based page.
pub fn offset(page: u64, page_size: u32) -> u64 {
    page.saturating_sub(1) * u64::from(page_size)
}
