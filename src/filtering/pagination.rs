//! Pagination metadata.
//!
//! Converts `(page, size, total)` into the metadata a list response carries.
//! The page number is never clamped against the page count: a request beyond
//! the last page gets zero items with `has_next = false`, not an error.

use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::models::PaginationParams;

/// Result metadata for one executed list query. Computed fresh per query,
/// never cached.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMetadata {
    pub page: u64,
    pub size: u64,
    pub total: u64,
    /// Total pages: `0` when there are no items, otherwise `ceil(total/size)`.
    pub pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
    pub next_page: Option<u64>,
    pub prev_page: Option<u64>,
}

impl PaginationMetadata {
    #[must_use]
    pub fn calculate(page: u64, size: u64, total: u64) -> Self {
        let size = size.max(1);
        let pages = if total == 0 { 0 } else { total.div_ceil(size) };
        let has_next = page < pages;
        let has_prev = page > 1;
        Self {
            page,
            size,
            total,
            pages,
            has_next,
            has_prev,
            next_page: has_next.then(|| page + 1),
            prev_page: has_prev.then(|| page - 1),
        }
    }
}

/// Metadata for the page described by `params` out of `total` matching rows.
#[must_use]
pub fn paginate(params: &PaginationParams, total: u64) -> PaginationMetadata {
    PaginationMetadata::calculate(params.page(), params.size(), total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_page_has_both_neighbours() {
        let meta = PaginationMetadata::calculate(2, 10, 25);
        assert_eq!(meta.pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);
        assert_eq!(meta.next_page, Some(3));
        assert_eq!(meta.prev_page, Some(1));
    }

    #[test]
    fn empty_total_means_zero_pages() {
        let meta = PaginationMetadata::calculate(1, 10, 0);
        assert_eq!(meta.pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.prev_page, None);
    }

    #[test]
    fn empty_total_on_a_later_page_still_has_prev() {
        let meta = PaginationMetadata::calculate(3, 10, 0);
        assert_eq!(meta.pages, 0);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
        assert_eq!(meta.prev_page, Some(2));
    }

    #[test]
    fn last_page_has_no_next() {
        let meta = PaginationMetadata::calculate(3, 10, 25);
        assert!(!meta.has_next);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.prev_page, Some(2));
    }

    #[test]
    fn page_beyond_the_last_is_not_an_error() {
        let meta = PaginationMetadata::calculate(9, 10, 25);
        assert_eq!(meta.pages, 3);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        let meta = PaginationMetadata::calculate(1, 10, 30);
        assert_eq!(meta.pages, 3);
        let meta = PaginationMetadata::calculate(1, 10, 31);
        assert_eq!(meta.pages, 4);
    }

    #[test]
    fn neighbour_flags_hold_across_a_grid() {
        for page in 1..=12 {
            for total in [0, 1, 9, 10, 11, 99, 100] {
                let meta = PaginationMetadata::calculate(page, 10, total);
                assert_eq!(meta.has_prev, page > 1);
                assert_eq!(meta.has_next, page < meta.pages);
                assert_eq!(meta.next_page.is_some(), meta.has_next);
                assert_eq!(meta.prev_page.is_some(), meta.has_prev);
            }
        }
    }

    #[test]
    fn serializes_without_absent_neighbours() {
        let meta = PaginationMetadata::calculate(1, 10, 5);
        let rendered = serde_json::to_string(&meta).unwrap();
        assert!(!rendered.contains("next_page"));
        assert!(!rendered.contains("prev_page"));
    }

    #[test]
    fn paginate_uses_the_clamped_params() {
        let params = PaginationParams::new(2, 10);
        let meta = paginate(&params, 25);
        assert_eq!(meta.page, 2);
        assert_eq!(meta.size, 10);
        assert_eq!(meta.total, 25);
        assert_eq!(meta.pages, 3);
    }
}
