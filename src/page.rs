/// Page Stage
///
/// Slices the filtered records into fixed-size pages. There is always at
/// least one page, so "page 1 of 1, 0 records" is a valid state.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::ops::Range;

/// Default page size of the route planner's data table
pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;

/// Current page (1-based) and the fixed page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    current_page: usize,
    items_per_page: NonZeroUsize,
}

impl PageState {
    /// Start on page 1
    pub fn new(items_per_page: NonZeroUsize) -> Self {
        PageState {
            current_page: 1,
            items_per_page,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page.get()
    }

    /// Same page size, different page. Page 0 is raised to 1; the upper
    /// bound is the controller's concern.
    pub fn with_page(self, page: usize) -> Self {
        PageState {
            current_page: page.max(1),
            ..self
        }
    }

    /// Clamp the current page into `[1, max(1, total_pages)]`
    pub fn clamped(self, total_pages: usize) -> Self {
        self.with_page(self.current_page.min(total_pages.max(1)))
    }

    /// Number of pages needed for `matches` records, never less than 1
    pub fn total_pages(&self, matches: usize) -> usize {
        total_pages(matches, self.items_per_page)
    }
}

impl Default for PageState {
    fn default() -> Self {
        PageState::new(NonZeroUsize::new(DEFAULT_ITEMS_PER_PAGE).unwrap_or(NonZeroUsize::MIN))
    }
}

/// `ceil(matches / items_per_page)`, minimum 1
pub fn total_pages(matches: usize, items_per_page: NonZeroUsize) -> usize {
    matches.div_ceil(items_per_page.get()).max(1)
}

/// The part of the filtered list shown on the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice {
    /// Positions within the filtered list
    pub range: Range<usize>,
    pub total_pages: usize,
}

impl PageSlice {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Compute the visible window of `match_count` filtered records.
///
/// Pages past the end yield an empty range rather than an error.
pub fn page_range(match_count: usize, state: &PageState) -> PageSlice {
    let per_page = state.items_per_page();
    let start = state
        .current_page()
        .saturating_sub(1)
        .saturating_mul(per_page)
        .min(match_count);
    let end = start.saturating_add(per_page).min(match_count);

    PageSlice {
        range: start..end,
        total_pages: state.total_pages(match_count),
    }
}

/// Slice `matching` to the current page
pub fn paginate<'a, T>(matching: &'a [T], state: &PageState) -> (&'a [T], usize) {
    let slice = page_range(matching.len(), state);
    (&matching[slice.range], slice.total_pages)
}

/// "Showing X to Y of Z" numbers for the footer, 1-based and inclusive.
///
/// With zero matches this is `(0, 0, 0)`.
pub fn showing(match_count: usize, state: &PageState) -> (usize, usize, usize) {
    let per_page = state.items_per_page();
    let page = state.current_page();
    let first = (page.saturating_sub(1) * per_page + 1).min(match_count);
    let last = (page * per_page).min(match_count);
    (first, last, match_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per_page(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_total_pages_minimum_one() {
        assert_eq!(total_pages(0, per_page(5)), 1);
        assert_eq!(total_pages(1, per_page(5)), 1);
        assert_eq!(total_pages(5, per_page(5)), 1);
        assert_eq!(total_pages(6, per_page(5)), 2);
        assert_eq!(total_pages(5, per_page(2)), 3);
    }

    #[test]
    fn test_last_page_is_partial() {
        let items = vec!['a', 'b', 'c', 'd', 'e'];
        let state = PageState::new(per_page(2)).with_page(3);
        let (visible, total) = paginate(&items, &state);
        assert_eq!(visible, &['e']);
        assert_eq!(total, 3);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let items = vec![1, 2, 3];
        let state = PageState::new(per_page(2)).with_page(10);
        let (visible, total) = paginate(&items, &state);
        assert!(visible.is_empty());
        assert_eq!(total, 2);
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<u8> = Vec::new();
        let slice = page_range(items.len(), &PageState::default());
        assert!(slice.is_empty());
        assert_eq!(slice.total_pages, 1);
    }

    #[test]
    fn test_page_zero_is_raised_to_one() {
        let state = PageState::default().with_page(0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_clamped() {
        let state = PageState::new(per_page(2)).with_page(4);
        assert_eq!(state.clamped(2).current_page(), 2);
        assert_eq!(state.clamped(0).current_page(), 1);
        assert_eq!(state.clamped(9).current_page(), 4);
    }

    #[test]
    fn test_showing() {
        let state = PageState::new(per_page(5));
        assert_eq!(showing(12, &state), (1, 5, 12));
        assert_eq!(showing(12, &state.with_page(3)), (11, 12, 12));
        assert_eq!(showing(0, &state), (0, 0, 0));
    }

    #[test]
    fn test_default_page_size() {
        assert_eq!(PageState::default().items_per_page(), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(PageState::default().current_page(), 1);
    }
}
