/// View Engine
///
/// Owns the Source Buffer and the current [`ControlState`], and keeps the
/// derived view consistent with both. Each control change recomputes the
/// stages whose inputs changed:
///
/// ```text
/// SourceBuffer --sort--> ordered --filter--> matching --page--> visible
/// ```
///
/// The sort output is cached on (buffer generation, sort config) and the
/// filter output on (sort output, search term), so flipping pages never
/// re-sorts and re-sorting never reloads.
///
/// # Examples
///
/// ```
/// use datatable::{EngineConfig, Record, ViewEngine};
///
/// let mut engine = ViewEngine::with_records(
///     EngineConfig::default().with_items_per_page(2).unwrap(),
///     vec![
///         Record::new().with("name", "Bob"),
///         Record::new().with("name", "amy"),
///         Record::new().with("name", "Cara"),
///     ],
/// );
///
/// engine.set_sort_key("name");
/// let view = engine.view();
/// assert_eq!(view.total_pages, 2);
/// assert_eq!(view.visible_records[0].get("name").unwrap().as_str(), Some("amy"));
///
/// engine.set_search("ar");
/// assert_eq!(engine.view().total_matches, 1);
/// ```

use crate::config::EngineConfig;
use crate::control::ControlState;
use crate::error::ViewResult;
use crate::filter::{filter, SearchTerm};
use crate::page::{page_range, showing};
use crate::record::{Record, SourceBuffer};
use crate::sort::{sort, Collation, SortConfig};
use serde::Serialize;

/// The visible slice plus the totals a pager needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView<'a> {
    pub visible_records: Vec<&'a Record>,
    pub total_pages: usize,
    pub total_matches: usize,
    pub current_page: usize,
    pub items_per_page: usize,
}

impl<'a> DerivedView<'a> {
    /// Footer numbers: first and last shown (1-based) and the match count
    pub fn showing(&self) -> (usize, usize, usize) {
        let first = (self.current_page.saturating_sub(1) * self.items_per_page + 1).min(self.total_matches);
        let last = (self.current_page * self.items_per_page).min(self.total_matches);
        (first, last, self.total_matches)
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.visible_records.is_empty()
    }

    /// Detach the view from the buffer it borrows
    pub fn to_owned_records(&self) -> Vec<Record> {
        self.visible_records.iter().map(|&record| record.clone()).collect()
    }
}

fn build_view<'a>(records: &'a [Record], matching: &[usize], control: &ControlState) -> DerivedView<'a> {
    let slice = page_range(matching.len(), control.page());
    DerivedView {
        visible_records: matching[slice.range]
            .iter()
            .filter_map(|&index| records.get(index))
            .collect(),
        total_pages: slice.total_pages,
        total_matches: matching.len(),
        current_page: control.current_page(),
        items_per_page: control.items_per_page(),
    }
}

/// Compute the derived view of `records` under `control` from scratch.
///
/// The page is taken as given: a page past the end yields no visible
/// records. [`ViewEngine`] clamps the page before it gets here.
pub fn derive_view<'a>(records: &'a [Record], control: &ControlState, collation: Collation) -> DerivedView<'a> {
    let ordered = sort(records, control.sort(), collation);
    let matching = filter(records, &ordered, control.search());
    build_view(records, &matching, control)
}

/// How many times each stage actually ran
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageStats {
    pub sort_runs: u64,
    pub filter_runs: u64,
}

#[derive(Debug, Clone, PartialEq)]
struct SortInputs {
    generation: u64,
    sort: Option<SortConfig>,
}

#[derive(Debug, Clone, PartialEq)]
struct FilterInputs {
    sort_run: u64,
    search: SearchTerm,
}

/// Stateful controller around the pure stages
#[derive(Debug)]
pub struct ViewEngine {
    config: EngineConfig,
    buffer: SourceBuffer,
    control: ControlState,
    /// sorted[view_pos] = buffer index
    sorted: Vec<usize>,
    sort_inputs: Option<SortInputs>,
    /// Positions of matching records, in sorted order
    matching: Vec<usize>,
    filter_inputs: Option<FilterInputs>,
    stats: StageStats,
}

impl ViewEngine {
    /// Engine over an empty buffer
    pub fn new(config: EngineConfig) -> Self {
        Self::with_records(config, Vec::new())
    }

    pub fn with_records(config: EngineConfig, records: Vec<Record>) -> Self {
        let control = ControlState::from_config(&config);
        let mut engine = ViewEngine {
            config,
            buffer: SourceBuffer::new(records),
            control,
            sorted: Vec::new(),
            sort_inputs: None,
            matching: Vec::new(),
            filter_inputs: None,
            stats: StageStats::default(),
        };
        engine.recompute();
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn buffer(&self) -> &SourceBuffer {
        &self.buffer
    }

    pub fn control(&self) -> &ControlState {
        &self.control
    }

    pub fn stats(&self) -> StageStats {
        self.stats
    }

    /// Replace the Source Buffer with a new load cycle's records
    pub fn load(&mut self, records: Vec<Record>) {
        log::debug!("loading {} records", records.len());
        self.buffer.replace(records);
        self.recompute();
    }

    /// Load a JSON array of objects. On error the current buffer is kept.
    pub fn load_json(&mut self, json: &str) -> ViewResult<()> {
        let loaded = SourceBuffer::from_json_str(json)?;
        self.load(loaded.into_records());
        Ok(())
    }

    /// Column header click: toggle on the active key, ascending otherwise
    pub fn set_sort_key(&mut self, key: &str) {
        self.control = self.control.with_sort_key(key);
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: Option<SortConfig>) {
        self.control = self.control.with_sort(sort);
        self.recompute();
    }

    /// Back to source order
    pub fn clear_sort(&mut self) {
        self.set_sort(None);
    }

    pub fn set_search(&mut self, term: impl Into<SearchTerm>) {
        self.control = self.control.with_search(term);
        self.recompute();
    }

    /// Go to `page`. Out-of-range requests are rejected and the page stays.
    pub fn set_page(&mut self, page: usize) -> ViewResult<()> {
        let next = self.control.with_page(page, self.total_pages());
        self.commit_page(next)
    }

    pub fn next_page(&mut self) -> ViewResult<()> {
        let next = self.control.next_page(self.total_pages());
        self.commit_page(next)
    }

    pub fn prev_page(&mut self) -> ViewResult<()> {
        let next = self.control.prev_page(self.total_pages());
        self.commit_page(next)
    }

    /// Replace the whole control snapshot. The page is clamped.
    pub fn apply(&mut self, control: ControlState) {
        self.control = control;
        self.recompute();
    }

    fn commit_page(&mut self, next: ViewResult<ControlState>) -> ViewResult<()> {
        match next {
            Ok(control) => {
                self.control = control;
                self.recompute();
                Ok(())
            }
            Err(e) => {
                log::debug!("page request rejected: {}", e);
                Err(e)
            }
        }
    }

    pub fn total_pages(&self) -> usize {
        self.control.page().total_pages(self.matching.len())
    }

    pub fn total_matches(&self) -> usize {
        self.matching.len()
    }

    pub fn current_page(&self) -> usize {
        self.control.current_page()
    }

    pub fn has_prev(&self) -> bool {
        self.control.has_prev()
    }

    pub fn has_next(&self) -> bool {
        self.control.has_next(self.total_pages())
    }

    pub fn sort_indicator(&self, key: &str) -> Option<&'static str> {
        self.control.sort_indicator(key)
    }

    /// Footer numbers for the current page
    pub fn showing(&self) -> (usize, usize, usize) {
        showing(self.matching.len(), self.control.page())
    }

    /// Every matching record in display order, across all pages
    pub fn matching_records(&self) -> impl Iterator<Item = &Record> {
        self.matching.iter().filter_map(|&index| self.buffer.get(index))
    }

    /// The current derived view
    pub fn view(&self) -> DerivedView<'_> {
        build_view(self.buffer.records(), &self.matching, &self.control)
    }

    fn recompute(&mut self) {
        let sort_inputs = SortInputs {
            generation: self.buffer.generation(),
            sort: self.control.sort().cloned(),
        };
        if self.sort_inputs.as_ref() != Some(&sort_inputs) {
            self.sorted = sort(self.buffer.records(), sort_inputs.sort.as_ref(), self.config.collation);
            self.sort_inputs = Some(sort_inputs);
            self.stats.sort_runs += 1;
            log::trace!("sorted {} records", self.sorted.len());
        }

        let filter_inputs = FilterInputs {
            sort_run: self.stats.sort_runs,
            search: self.control.search().clone(),
        };
        if self.filter_inputs.as_ref() != Some(&filter_inputs) {
            self.matching = filter(self.buffer.records(), &self.sorted, &filter_inputs.search);
            self.filter_inputs = Some(filter_inputs);
            self.stats.filter_runs += 1;
            log::trace!("{} of {} records match", self.matching.len(), self.sorted.len());
        }

        let total_pages = self.total_pages();
        if self.control.current_page() > total_pages {
            log::debug!(
                "clamping page {} to {} after the match set changed",
                self.control.current_page(),
                total_pages
            );
            self.control = self.control.clamped(total_pages);
        }
    }
}

impl Default for ViewEngine {
    fn default() -> Self {
        ViewEngine::new(EngineConfig::default())
    }
}
