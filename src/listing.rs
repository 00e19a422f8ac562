//! Shared list-page orchestration: filter state, search, pagination, and the
//! fetch lifecycle behind every list screen (fleet, garages, requests,
//! screening).
//!
//! Each page owns one [`ListController`] wired to a [`PageFetcher`]
//! implementation over its repository. The controller enforces the rules the
//! pages have in common: criteria changes snap back to page 1 before
//! refetching, page navigation never touches criteria, a failed fetch leaves
//! the previously loaded page intact, and a stale response can never
//! overwrite the state produced by a newer request.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pagination::Paginated;

/// Page size shared by all list screens.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

#[derive(Debug, Error)]
pub enum ListingError {
    /// The data source could not be reached at all.
    #[error("transport error: {0}")]
    Transport(String),

    /// The data source answered with a failure.
    #[error("data source error: {0}")]
    Application(String),
}

pub type ListingResult<T> = Result<T, ListingError>;

/// Position within a paged collection. `current_page` stays within
/// `[1, last_page]`, and `last_page` is at least 1 even for an empty
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub current_page: usize,
    pub last_page: usize,
    pub total: usize,
    pub per_page: usize,
}

impl PaginationState {
    fn new(per_page: usize) -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            total: 0,
            per_page: per_page.max(1),
        }
    }
}

/// Named multi-select filters: category name to the set of selected option
/// ids. An empty (absent) set means "unrestricted", never "nothing matches";
/// a "select all" control therefore clears the category instead of
/// enumerating every id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState(BTreeMap<String, BTreeSet<String>>);

impl FilterState {
    pub fn toggle(&mut self, category: &str, option_id: &str) {
        let selected = self.0.entry(category.to_string()).or_default();
        if !selected.remove(option_id) {
            selected.insert(option_id.to_string());
        }
        if selected.is_empty() {
            self.0.remove(category);
        }
    }

    /// Replaces the whole selection for a category. An empty iterator clears
    /// the restriction.
    pub fn set(&mut self, category: &str, option_ids: impl IntoIterator<Item = String>) {
        let selected: BTreeSet<String> = option_ids.into_iter().collect();
        if selected.is_empty() {
            self.0.remove(category);
        } else {
            self.0.insert(category.to_string(), selected);
        }
    }

    /// Selected ids of a category, in stable order; empty when unrestricted.
    pub fn selected_ids(&self, category: &str) -> Vec<String> {
        self.0
            .get(category)
            .map(|selected| selected.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_selected(&self, category: &str, option_id: &str) -> bool {
        self.0
            .get(category)
            .is_some_and(|selected| selected.contains(option_id))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Non-empty categories with their ids comma-joined, ready for a query.
    fn to_query(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(category, selected)| {
                let joined = selected.iter().cloned().collect::<Vec<_>>().join(",");
                (category.clone(), joined)
            })
            .collect()
    }
}

/// The flattened request derived from the current controller state. Rebuilt
/// on every fetch, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParams {
    pub page: usize,
    pub size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_max: Option<i32>,
    /// Comma-joined selected ids per filter category; empty categories are
    /// omitted entirely.
    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn filter_ids(&self, category: &str) -> Option<Vec<String>> {
        self.filters
            .get(category)
            .map(|joined| joined.split(',').map(str::to_string).collect())
    }
}

/// Pagination metadata as reported by the data source, which is authoritative
/// for totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: usize,
    pub last_page: usize,
    pub total: usize,
}

impl PageMeta {
    /// Metadata for serving `page` out of a collection of `total` items. A
    /// page beyond the end is clamped to the last page; the caller must then
    /// serve the clamped page's items.
    pub fn for_page(page: usize, size: usize, total: usize) -> Self {
        let last_page = total.div_ceil(size.max(1)).max(1);
        Self {
            current_page: page.clamp(1, last_page),
            last_page,
            total,
        }
    }
}

/// One fetched page of items plus its metadata.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// The data-source side of a list page.
pub trait PageFetcher {
    type Item;

    fn fetch_page(&self, query: &QueryParams) -> ListingResult<Page<Self::Item>>;
}

/// One selectable option of a filter category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub id: String,
    pub name: String,
}

impl FilterOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Filter vocabularies per category, fetched once per page mount.
pub type FilterOptions = BTreeMap<String, Vec<FilterOption>>;

/// State restored from the request URL before the initial fetch of a page.
#[derive(Debug, Clone, Default)]
pub struct ListSnapshot {
    pub page: usize,
    pub search: String,
    pub filters: Vec<(String, Vec<String>)>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
}

/// Identifies one issued fetch so a late response can be recognized as stale.
#[derive(Debug)]
pub struct FetchTicket {
    pub id: u64,
    pub query: QueryParams,
}

/// Owns the filter/search/pagination state of one list page and the fetch
/// lifecycle that keeps the displayed items in sync with it.
pub struct ListController<F: PageFetcher> {
    fetcher: F,
    pagination: PaginationState,
    filters: FilterState,
    search_term: String,
    search_draft: String,
    year_min: Option<i32>,
    year_max: Option<i32>,
    items: Vec<F::Item>,
    latest_request: u64,
}

impl<F: PageFetcher> ListController<F> {
    pub fn new(fetcher: F, per_page: usize) -> Self {
        Self {
            fetcher,
            pagination: PaginationState::new(per_page),
            filters: FilterState::default(),
            search_term: String::new(),
            search_draft: String::new(),
            year_min: None,
            year_max: None,
            items: Vec::new(),
            latest_request: 0,
        }
    }

    /// Restores criteria and page position (typically parsed from the request
    /// URL) without fetching. The next [`refresh`](Self::refresh) loads the
    /// matching page; the data source then corrects any out-of-range page.
    pub fn restore(&mut self, snapshot: ListSnapshot) {
        let page = snapshot.page.max(1);
        self.pagination.current_page = page;
        self.pagination.last_page = self.pagination.last_page.max(page);
        self.search_term = snapshot.search.trim().to_string();
        self.search_draft = self.search_term.clone();
        for (category, ids) in snapshot.filters {
            self.filters.set(&category, ids);
        }
        self.year_min = snapshot.year_min;
        self.year_max = snapshot.year_max;
    }

    pub fn items(&self) -> &[F::Item] {
        &self.items
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Derives the flat query for the current state.
    pub fn query(&self) -> QueryParams {
        QueryParams {
            page: self.pagination.current_page,
            size: self.pagination.per_page,
            search: Some(self.search_term.clone()).filter(|s| !s.is_empty()),
            year_min: self.year_min,
            year_max: self.year_max,
            filters: self.filters.to_query(),
        }
    }

    /// Updates the live search input. No fetch: search only takes effect on
    /// [`commit_search`](Self::commit_search), so typing never causes a
    /// request storm.
    pub fn set_search_draft(&mut self, text: impl Into<String>) {
        self.search_draft = text.into();
    }

    /// Commits the draft (input blur). Fetches only when the committed value
    /// actually changed.
    pub fn commit_search(&mut self) -> ListingResult<()> {
        let committed = self.search_draft.trim().to_string();
        if committed == self.search_term {
            return Ok(());
        }
        self.search_term = committed;
        self.criteria_changed()
    }

    /// Flips one option of a filter category.
    pub fn toggle_filter_option(&mut self, category: &str, option_id: &str) -> ListingResult<()> {
        self.filters.toggle(category, option_id);
        self.criteria_changed()
    }

    /// Replaces a category's whole selection ("select all" clears it).
    pub fn set_filter_options(
        &mut self,
        category: &str,
        option_ids: impl IntoIterator<Item = String>,
    ) -> ListingResult<()> {
        self.filters.set(category, option_ids);
        self.criteria_changed()
    }

    pub fn set_year_range(
        &mut self,
        year_min: Option<i32>,
        year_max: Option<i32>,
    ) -> ListingResult<()> {
        if (year_min, year_max) == (self.year_min, self.year_max) {
            return Ok(());
        }
        self.year_min = year_min;
        self.year_max = year_max;
        self.criteria_changed()
    }

    /// Resets filters, search, and ranges to their initial empty state.
    /// Fetches only when something was actually set, which also makes the
    /// operation idempotent.
    pub fn clear_all_filters(&mut self) -> ListingResult<()> {
        let pristine = self.filters.is_empty()
            && self.search_term.is_empty()
            && self.search_draft.is_empty()
            && self.year_min.is_none()
            && self.year_max.is_none();
        if pristine {
            return Ok(());
        }
        self.filters.clear();
        self.search_term.clear();
        self.search_draft.clear();
        self.year_min = None;
        self.year_max = None;
        self.criteria_changed()
    }

    /// Jumps to a page. Out-of-range targets are clamped; jumping to the
    /// current page is a no-op. Criteria are never touched by navigation.
    pub fn go_to_page(&mut self, page: usize) -> ListingResult<()> {
        let target = page.clamp(1, self.pagination.last_page);
        if target == self.pagination.current_page {
            return Ok(());
        }
        self.pagination.current_page = target;
        self.dispatch()
    }

    /// Fetches the page for the current state unconditionally (initial load,
    /// user-initiated retry).
    pub fn refresh(&mut self) -> ListingResult<()> {
        self.dispatch()
    }

    /// Any criteria change lands the user on page 1: refetch in place when
    /// already there, otherwise reset the page which triggers the same fetch.
    fn criteria_changed(&mut self) -> ListingResult<()> {
        if self.pagination.current_page != 1 {
            self.pagination.current_page = 1;
        }
        self.dispatch()
    }

    /// Issues a request id for the query derived from the current state.
    /// Split from [`apply_response`](Self::apply_response) so transports that
    /// answer out of order still get the staleness guard.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_request += 1;
        FetchTicket {
            id: self.latest_request,
            query: self.query(),
        }
    }

    /// Applies a fetched page unless a newer request has been issued since.
    /// Items and pagination are replaced together; the response metadata is
    /// authoritative for totals. Returns whether the response was applied.
    pub fn apply_response(&mut self, request_id: u64, page: Page<F::Item>) -> bool {
        if request_id != self.latest_request {
            return false;
        }
        self.items = page.items;
        self.pagination.total = page.meta.total;
        self.pagination.last_page = page.meta.last_page.max(1);
        self.pagination.current_page = page.meta.current_page.clamp(1, self.pagination.last_page);
        true
    }

    /// On failure the previous items and pagination stay in place so the user
    /// can retry; the error is returned for the page to surface.
    fn dispatch(&mut self) -> ListingResult<()> {
        let ticket = self.begin_fetch();
        let page = self.fetcher.fetch_page(&ticket.query)?;
        self.apply_response(ticket.id, page);
        Ok(())
    }

    /// Finishes the request: hands the loaded page over for rendering.
    pub fn into_paginated(self) -> Paginated<F::Item> {
        Paginated::new(
            self.items,
            self.pagination.current_page,
            self.pagination.total,
            self.pagination.per_page,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Serves 45 unfiltered items; a `status` filter narrows the result to 5.
    /// Records every received query.
    struct StubFetcher {
        calls: RefCell<Vec<QueryParams>>,
    }

    impl StubFetcher {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }

        fn last_call(&self) -> QueryParams {
            self.calls.borrow().last().cloned().unwrap()
        }
    }

    impl PageFetcher for &StubFetcher {
        type Item = usize;

        fn fetch_page(&self, query: &QueryParams) -> ListingResult<Page<usize>> {
            self.calls.borrow_mut().push(query.clone());

            let total: usize = if query.filters.contains_key("status") {
                5
            } else {
                45
            };
            let last_page = total.div_ceil(query.size).max(1);
            let current_page = query.page.clamp(1, last_page);
            let first = (current_page - 1) * query.size;
            let items = (first..total.min(first + query.size)).collect();

            Ok(Page {
                items,
                meta: PageMeta {
                    current_page,
                    last_page,
                    total,
                },
            })
        }
    }

    struct FailingFetcher;

    impl PageFetcher for FailingFetcher {
        type Item = usize;

        fn fetch_page(&self, _query: &QueryParams) -> ListingResult<Page<usize>> {
            Err(ListingError::Transport("connection refused".into()))
        }
    }

    fn loaded_controller(fetcher: &StubFetcher) -> ListController<&StubFetcher> {
        let mut controller = ListController::new(fetcher, 20);
        controller.refresh().unwrap();
        controller
    }

    #[test]
    fn refresh_loads_first_page() {
        let fetcher = StubFetcher::new();
        let controller = loaded_controller(&fetcher);

        assert_eq!(controller.items().len(), 20);
        assert_eq!(controller.pagination().total, 45);
        assert_eq!(controller.pagination().last_page, 3);
        assert_eq!(controller.pagination().current_page, 1);
    }

    #[test]
    fn criteria_change_resets_to_page_one() {
        let fetcher = StubFetcher::new();
        let mut controller = loaded_controller(&fetcher);
        controller.go_to_page(3).unwrap();
        assert_eq!(controller.pagination().current_page, 3);

        controller.toggle_filter_option("status", "available").unwrap();

        assert_eq!(controller.pagination().current_page, 1);
        assert_eq!(fetcher.last_call().page, 1);
    }

    #[test]
    fn narrowing_filter_updates_totals_from_response() {
        let fetcher = StubFetcher::new();
        let mut controller = loaded_controller(&fetcher);
        controller.go_to_page(3).unwrap();

        controller.toggle_filter_option("status", "available").unwrap();

        assert_eq!(controller.pagination().total, 5);
        assert_eq!(controller.pagination().last_page, 1);
        assert_eq!(controller.pagination().current_page, 1);
        assert_eq!(controller.items().len(), 5);
    }

    #[test]
    fn page_navigation_leaves_criteria_alone() {
        let fetcher = StubFetcher::new();
        let mut controller = loaded_controller(&fetcher);
        controller.set_search_draft("ka 123");
        controller.commit_search().unwrap();
        controller.toggle_filter_option("status", "available").unwrap();
        let filters_before = controller.filters().clone();

        controller.go_to_page(1).unwrap();

        assert_eq!(controller.search_term(), "ka 123");
        assert_eq!(controller.filters(), &filters_before);
    }

    #[test]
    fn jump_to_page_fetches_exactly_once() {
        let fetcher = StubFetcher::new();
        let mut controller = loaded_controller(&fetcher);
        let calls_before = fetcher.call_count();

        controller.go_to_page(2).unwrap();

        assert_eq!(fetcher.call_count(), calls_before + 1);
        assert_eq!(fetcher.last_call().page, 2);
    }

    #[test]
    fn jump_to_current_page_is_a_no_op() {
        let fetcher = StubFetcher::new();
        let mut controller = loaded_controller(&fetcher);
        let calls_before = fetcher.call_count();

        controller.go_to_page(1).unwrap();

        assert_eq!(fetcher.call_count(), calls_before);
    }

    #[test]
    fn out_of_range_jump_is_clamped() {
        let fetcher = StubFetcher::new();
        let mut controller = loaded_controller(&fetcher);

        controller.go_to_page(99).unwrap();

        assert_eq!(controller.pagination().current_page, 3);
    }

    #[test]
    fn draft_edits_do_not_fetch_until_committed() {
        let fetcher = StubFetcher::new();
        let mut controller = loaded_controller(&fetcher);
        let calls_before = fetcher.call_count();

        controller.set_search_draft("ka");
        controller.set_search_draft("ka 123");
        assert_eq!(fetcher.call_count(), calls_before);

        controller.commit_search().unwrap();
        assert_eq!(fetcher.call_count(), calls_before + 1);
        assert_eq!(fetcher.last_call().search.as_deref(), Some("ka 123"));
    }

    #[test]
    fn committing_an_unchanged_search_does_not_fetch() {
        let fetcher = StubFetcher::new();
        let mut controller = loaded_controller(&fetcher);
        controller.set_search_draft("ka 123");
        controller.commit_search().unwrap();
        let calls_before = fetcher.call_count();

        controller.set_search_draft("  ka 123  ");
        controller.commit_search().unwrap();

        assert_eq!(fetcher.call_count(), calls_before);
    }

    #[test]
    fn clear_all_filters_is_idempotent() {
        let fetcher = StubFetcher::new();
        let mut controller = loaded_controller(&fetcher);
        controller.toggle_filter_option("status", "available").unwrap();
        controller.set_search_draft("ka");
        controller.commit_search().unwrap();
        controller.set_year_range(Some(2015), Some(2020)).unwrap();

        controller.clear_all_filters().unwrap();
        let calls_after_first = fetcher.call_count();
        let query_after_first = controller.query();

        controller.clear_all_filters().unwrap();

        assert_eq!(fetcher.call_count(), calls_after_first);
        assert_eq!(controller.query(), query_after_first);
        assert!(controller.filters().is_empty());
        assert_eq!(controller.search_term(), "");
    }

    #[test]
    fn query_omits_empty_criteria_and_joins_selected_ids() {
        let fetcher = StubFetcher::new();
        let mut controller = loaded_controller(&fetcher);
        controller.toggle_filter_option("status", "retired").unwrap();
        controller.toggle_filter_option("status", "available").unwrap();
        controller.set_year_range(Some(2015), None).unwrap();

        let query = controller.query();

        assert_eq!(
            query.filters.get("status").map(String::as_str),
            Some("available,retired")
        );
        assert!(!query.filters.contains_key("garage"));
        assert_eq!(query.search, None);
        assert_eq!(query.year_min, Some(2015));
        assert_eq!(query.year_max, None);
    }

    #[test]
    fn deselecting_the_last_option_lifts_the_restriction() {
        let fetcher = StubFetcher::new();
        let mut controller = loaded_controller(&fetcher);
        controller.toggle_filter_option("status", "available").unwrap();
        controller.toggle_filter_option("status", "available").unwrap();

        assert!(controller.filters().is_empty());
        assert!(!controller.query().filters.contains_key("status"));
    }

    #[test]
    fn select_all_is_represented_as_no_restriction() {
        let fetcher = StubFetcher::new();
        let mut controller = loaded_controller(&fetcher);
        controller
            .set_filter_options("status", vec!["available".into(), "retired".into()])
            .unwrap();
        assert!(!controller.filters().is_empty());

        controller.set_filter_options("status", Vec::new()).unwrap();

        assert!(controller.filters().is_empty());
    }

    #[test]
    fn failed_fetch_keeps_previous_page() {
        let fetcher = StubFetcher::new();
        let mut warm = loaded_controller(&fetcher);
        warm.go_to_page(2).unwrap();
        let items_before = warm.items().to_vec();
        let pagination_before = warm.pagination().clone();

        // Swap in a failing source by rebuilding state on a fresh controller.
        let mut controller = ListController::new(FailingFetcher, 20);
        controller.restore(ListSnapshot {
            page: 2,
            ..ListSnapshot::default()
        });
        let seeded = Page {
            items: items_before.clone(),
            meta: PageMeta {
                current_page: pagination_before.current_page,
                last_page: pagination_before.last_page,
                total: pagination_before.total,
            },
        };
        let ticket = controller.begin_fetch();
        assert!(controller.apply_response(ticket.id, seeded));

        assert!(controller.toggle_filter_option("status", "x").is_err());

        assert_eq!(controller.items(), &items_before[..]);
        assert_eq!(controller.pagination().total, pagination_before.total);
        assert_eq!(controller.pagination().last_page, pagination_before.last_page);
    }

    #[test]
    fn stale_response_is_discarded() {
        let fetcher = StubFetcher::new();
        let mut controller = ListController::new(&fetcher, 20);

        let first = controller.begin_fetch();
        let second = controller.begin_fetch();

        let newer = Page {
            items: vec![1, 2, 3],
            meta: PageMeta {
                current_page: 1,
                last_page: 1,
                total: 3,
            },
        };
        assert!(controller.apply_response(second.id, newer));

        let stale = Page {
            items: vec![9; 20],
            meta: PageMeta {
                current_page: 2,
                last_page: 5,
                total: 100,
            },
        };
        assert!(!controller.apply_response(first.id, stale));

        assert_eq!(controller.items(), &[1, 2, 3]);
        assert_eq!(controller.pagination().total, 3);
    }

    #[test]
    fn restore_rebuilds_criteria_without_fetching() {
        let fetcher = StubFetcher::new();
        let mut controller = ListController::new(&fetcher, 20);
        controller.restore(ListSnapshot {
            page: 2,
            search: " ka 123 ".into(),
            filters: vec![("status".into(), vec!["available".into()])],
            year_min: Some(2018),
            year_max: Some(2022),
        });
        assert_eq!(fetcher.call_count(), 0);

        controller.refresh().unwrap();

        let query = fetcher.last_call();
        assert_eq!(query.page, 2);
        assert_eq!(query.search.as_deref(), Some("ka 123"));
        assert_eq!(query.filters.get("status").map(String::as_str), Some("available"));
        assert_eq!(query.year_min, Some(2018));
        assert_eq!(query.year_max, Some(2022));
    }
}
