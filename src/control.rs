/// Control state and its transition rules
///
/// `ControlState` is an immutable snapshot of everything the user controls:
/// the sort, the search text and the page. Every transition returns a new
/// snapshot, and the derived view is recomputed from the snapshot each time.
///
/// Transition rules:
///
/// - Picking the active sort key again flips its direction; picking another
///   key sorts by it ascending. The page is left alone.
/// - Changing the search term keeps the page, but the page is clamped into
///   the new page range once the matches are known.
/// - A page request is accepted only inside `[1, total_pages]`.

use crate::config::EngineConfig;
use crate::error::{ViewError, ViewResult};
use crate::filter::SearchTerm;
use crate::page::PageState;
use crate::sort::SortConfig;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    sort: Option<SortConfig>,
    search: SearchTerm,
    page: PageState,
}

impl ControlState {
    /// No sort, empty search, page 1
    pub fn new(items_per_page: NonZeroUsize) -> Self {
        ControlState {
            sort: None,
            search: SearchTerm::default(),
            page: PageState::new(items_per_page),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        ControlState {
            sort: config.initial_sort.clone(),
            ..ControlState::new(config.items_per_page)
        }
    }

    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    pub fn search(&self) -> &SearchTerm {
        &self.search
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page()
    }

    pub fn items_per_page(&self) -> usize {
        self.page.items_per_page()
    }

    /// Click on a column header
    pub fn with_sort_key(&self, key: &str) -> Self {
        let sort = match &self.sort {
            Some(active) if active.key == key => SortConfig::new(key, active.direction.toggled()),
            _ => SortConfig::ascending(key),
        };
        ControlState {
            sort: Some(sort),
            ..self.clone()
        }
    }

    /// Set an explicit sort, or `None` for source order
    pub fn with_sort(&self, sort: Option<SortConfig>) -> Self {
        ControlState {
            sort,
            ..self.clone()
        }
    }

    pub fn without_sort(&self) -> Self {
        self.with_sort(None)
    }

    pub fn with_search(&self, term: impl Into<SearchTerm>) -> Self {
        ControlState {
            search: term.into(),
            ..self.clone()
        }
    }

    /// Go to `page`, which must lie in `[1, total_pages]`
    pub fn with_page(&self, page: usize, total_pages: usize) -> ViewResult<Self> {
        let total_pages = total_pages.max(1);
        if page < 1 || page > total_pages {
            return Err(ViewError::PageOutOfRange {
                requested: page,
                total_pages,
            });
        }
        Ok(ControlState {
            page: self.page.with_page(page),
            ..self.clone()
        })
    }

    pub fn next_page(&self, total_pages: usize) -> ViewResult<Self> {
        self.with_page(self.current_page() + 1, total_pages)
    }

    pub fn prev_page(&self, total_pages: usize) -> ViewResult<Self> {
        self.with_page(self.current_page().saturating_sub(1), total_pages)
    }

    /// "Prev" is enabled
    pub fn has_prev(&self) -> bool {
        self.current_page() > 1
    }

    /// "Next" is enabled
    pub fn has_next(&self, total_pages: usize) -> bool {
        self.current_page() < total_pages
    }

    /// Pull the page back into `[1, max(1, total_pages)]`
    pub fn clamped(&self, total_pages: usize) -> Self {
        ControlState {
            page: self.page.clamped(total_pages),
            ..self.clone()
        }
    }

    /// Arrow for a column header: `Some(" ↑")` or `Some(" ↓")` on the
    /// active key, `None` elsewhere.
    pub fn sort_indicator(&self, key: &str) -> Option<&'static str> {
        self.sort
            .as_ref()
            .filter(|sort| sort.key == key)
            .map(|sort| sort.direction.arrow())
    }
}

impl Default for ControlState {
    fn default() -> Self {
        ControlState::from_config(&EngineConfig::default())
    }
}
