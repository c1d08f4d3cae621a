//! Page slicer and the result view handed to presentation layers

use crate::core::query::{PaginatedResponse, PaginationMeta};
use crate::core::record::Record;
use serde::Serialize;

/// One page of a filtered, sorted collection plus pagination metadata
///
/// `items` borrow the caller's records. Presentation layers must rely on
/// `total_matched`, `total_pages` and `page` rather than `items.len()`: the
/// last page is usually partial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView<'a> {
    pub items: Vec<&'a Record>,

    /// Records matching the filters, across all pages
    pub total_matched: usize,

    /// `ceil(total_matched / page_size)`, 0 when nothing matched
    pub total_pages: usize,

    /// The page actually returned, clamped into `[1, max(total_pages, 1)]`
    pub page: usize,

    pub page_size: usize,
}

impl ResultView<'_> {
    pub fn is_empty(&self) -> bool {
        self.total_matched == 0
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Slice one page out of an ordered sequence
///
/// A page past the end is clamped down to the last page (minimum 1) so the
/// caller can show the corrected page number. A zero `page` or `page_size`
/// is treated as 1.
pub fn paginate<'a>(ordered: &[&'a Record], page: usize, page_size: usize) -> ResultView<'a> {
    let page_size = page_size.max(1);
    let total_matched = ordered.len();
    let total_pages = total_matched.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * page_size).min(total_matched);
    let end = start.saturating_add(page_size).min(total_matched);

    ResultView {
        items: ordered[start..end].to_vec(),
        total_matched,
        total_pages,
        page,
        page_size,
    }
}

impl<'a> From<ResultView<'a>> for PaginatedResponse<&'a Record> {
    fn from(view: ResultView<'a>) -> Self {
        let pagination = PaginationMeta::new(view.page, view.page_size, view.total_matched);
        Self {
            data: view.items,
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new().with("n", i as f64))
            .collect()
    }

    fn numbers(view: &ResultView<'_>) -> Vec<f64> {
        view.items.iter().filter_map(|r| r.number("n")).collect()
    }

    #[test]
    fn test_first_and_partial_last_page() {
        let records = numbered(5);
        let refs: Vec<&Record> = records.iter().collect();

        let first = paginate(&refs, 1, 2);
        assert_eq!(numbers(&first), [0.0, 1.0]);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next());
        assert!(!first.has_prev());

        let last = paginate(&refs, 3, 2);
        assert_eq!(numbers(&last), [4.0]);
        assert!(!last.has_next());
    }

    #[test]
    fn test_page_past_end_is_clamped() {
        let records = numbered(5);
        let refs: Vec<&Record> = records.iter().collect();

        let view = paginate(&refs, 999, 2);
        assert_eq!(view.page, 3);
        assert_eq!(view, paginate(&refs, 3, 2));
    }

    #[test]
    fn test_empty_collection() {
        let view = paginate(&[], 4, 10);
        assert!(view.items.is_empty());
        assert!(view.is_empty());
        assert_eq!(view.total_matched, 0);
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.page, 1);
    }

    #[test]
    fn test_zero_page_and_size_are_total() {
        let records = numbered(3);
        let refs: Vec<&Record> = records.iter().collect();

        let view = paginate(&refs, 0, 0);
        assert_eq!(view.page, 1);
        assert_eq!(view.page_size, 1);
        assert_eq!(view.total_pages, 3);
        assert_eq!(numbers(&view), [0.0]);
    }

    #[test]
    fn test_into_paginated_response() {
        let records = numbered(5);
        let refs: Vec<&Record> = records.iter().collect();

        let response: PaginatedResponse<&Record> = paginate(&refs, 2, 2).into();
        assert_eq!(response.data.len(), 2);
        assert_eq!(
            response.pagination,
            PaginationMeta {
                page: 2,
                limit: 2,
                total: 5,
                total_pages: 3,
                has_next: true,
                has_prev: true,
            }
        );
    }
}
