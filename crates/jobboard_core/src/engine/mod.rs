//! Reconciliation engine: one displayed list from remote pages and local
//! preferences.
//!
//! The engine owns the selection, the fetched job set and the derived
//! display. Every mutation ends in [`derive_displayed`], so the display is
//! always a function of current state.
//!
//! # Architecture
//!
//! ```text
//! Event ──► ReconciliationEngine ──► PreferenceStore (snapshot, orders)
//!                 │      ▲
//!        begin_fetch    complete_fetch (stale ids discarded)
//!                 ▼      │
//!               JobSource
//! ```
//!
//! # Example
//!
//! ```no_run
//! use jobboard_core::config::Settings;
//! use jobboard_core::engine::ReconciliationEngine;
//! use jobboard_core::prefs::MemoryStore;
//! use jobboard_core::source::HrflowSource;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::default();
//! let source = HrflowSource::new(settings.api.clone())?;
//! let mut engine = ReconciliationEngine::new(source, MemoryStore::new(), &settings.paging);
//!
//! engine.initialize().await;
//! engine.set_category("Human Resources").await;
//! for job in engine.displayed_jobs() {
//!     println!("{}", job.name);
//! }
//! # Ok(())
//! # }
//! ```

mod derive;
mod events;
mod status;

pub use derive::derive_displayed;
pub use events::Event;
pub use status::{ViewStatus, SORT_LOCKED_HINT};

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::PagingSettings;
use crate::drag::{on_drag_end, DragOutcome};
use crate::models::{Job, Selection, SortKey};
use crate::prefs::{
    page_order_key, read_json, write_json, OrderRecord, PreferenceStore, SavedFilters,
    GLOBAL_ORDER_KEY, USER_FILTERS_KEY,
};
use crate::source::{fetch_with_deadline, FetchError, FetchRequest, JobPage, JobSource};

/// Pages whose stored orders are removed by [`ReconciliationEngine::reset_all`].
const RESET_ORDER_PAGES: [u32; 2] = [1, 2];

/// A started fetch. Hand the outcome back through
/// [`ReconciliationEngine::complete_fetch`] with the same `id`.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub id: u64,
    pub request: FetchRequest,
    pub cancel: CancellationToken,
}

/// The fetch whose outcome is still awaited.
#[derive(Debug)]
struct InFlight {
    id: u64,
    page: u32,
    cancel: CancellationToken,
}

/// Mutable engine state.
#[derive(Debug, Default)]
struct EngineState {
    selection: Selection,
    jobs: Vec<Job>,
    displayed: Vec<Job>,
    total_pages: u32,
    loading: bool,
    error: Option<FetchError>,
    manual_order_used: bool,
    has_loaded: bool,
    /// Page that `jobs` was fetched for.
    loaded_page: Option<u32>,
    next_request_id: u64,
    in_flight: Option<InFlight>,
}

/// Combines a [`JobSource`] with a [`PreferenceStore`] into one displayed
/// job list.
pub struct ReconciliationEngine<S, P> {
    source: S,
    store: P,
    page_size: u32,
    timeout: Duration,
    state: EngineState,
}

impl<S, P> ReconciliationEngine<S, P>
where
    S: JobSource,
    P: PreferenceStore,
{
    pub fn new(source: S, store: P, paging: &PagingSettings) -> Self {
        Self {
            source,
            store,
            page_size: paging.page_size,
            timeout: paging.timeout(),
            state: EngineState::default(),
        }
    }

    // ---------------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------------

    /// Restore the saved selection and fetch its page.
    pub async fn initialize(&mut self) {
        self.state.selection = read_json::<SavedFilters, _>(&self.store, USER_FILTERS_KEY)
            .map(SavedFilters::into_selection)
            .unwrap_or_default();
        info!(
            "Restored selection: term='{}' category='{}' sort={} page={}",
            self.state.selection.search_term,
            self.state.selection.category,
            self.state.selection.sort_key,
            self.state.selection.page
        );
        self.rederive();
        self.refresh().await;
    }

    /// Change the search term. Local only: no fetch.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.selection.search_term = term.into();
        self.persist_selection();
        self.rederive();
    }

    /// Change the category and refetch the current page.
    pub async fn set_category(&mut self, category: impl Into<String>) {
        self.state.selection.category = category.into();
        self.persist_selection();
        self.rederive();
        self.refresh().await;
    }

    /// Change the sort key and refetch the current page.
    ///
    /// Accepted even while the sort control is locked; the lock is a
    /// presentation concern.
    pub async fn set_sort_key(&mut self, key: SortKey) {
        self.state.selection.sort_key = key;
        self.persist_selection();
        self.rederive();
        self.refresh().await;
    }

    /// Go to page `page` (1-based) and fetch it. Page 0 is ignored.
    pub async fn set_page(&mut self, page: u32) {
        if page < 1 {
            warn!("Ignoring request for page {}", page);
            return;
        }
        self.state.selection.page = page;
        self.persist_selection();
        self.refresh().await;
    }

    /// Advance one page if there is a next page.
    pub async fn next_page(&mut self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        self.set_page(self.state.selection.page + 1).await;
        true
    }

    /// Go back one page if not on the first.
    pub async fn previous_page(&mut self) -> bool {
        if !self.has_previous_page() {
            return false;
        }
        self.set_page(self.state.selection.page - 1).await;
        true
    }

    /// Restore defaults, forget stored orders for pages 1 and 2 and the
    /// global order, then fetch page 1.
    pub async fn reset_all(&mut self) {
        info!("Resetting selection and manual orders");
        self.state.selection = Selection::default();
        self.state.manual_order_used = false;

        let keys = RESET_ORDER_PAGES
            .iter()
            .map(|&page| page_order_key(page))
            .chain([GLOBAL_ORDER_KEY.to_string(), USER_FILTERS_KEY.to_string()]);
        for key in keys {
            if let Err(e) = self.store.remove(&key) {
                warn!("Failed to remove preference '{}': {}", key, e);
            }
        }

        self.rederive();
        self.refresh().await;
    }

    /// Adopt the result of a drag. Returns whether the display changed.
    ///
    /// The new order is stored for the page the list was fetched from and
    /// as the global order, and the sort control becomes locked.
    pub fn apply_manual_order(&mut self, source: usize, destination: Option<usize>) -> bool {
        let outcome = DragOutcome {
            source,
            destination,
        };
        let Some(reordered) =
            on_drag_end(outcome, &self.state.displayed, self.is_drag_disabled())
        else {
            return false;
        };

        let page = self.display_page();
        debug!(
            "Manual order on page {}: {} -> {:?}",
            page, source, destination
        );
        self.state.displayed = reordered;
        self.state.manual_order_used = true;

        let record = OrderRecord::from_jobs(&self.state.displayed);
        let page_key = page_order_key(page);
        for key in [page_key.as_str(), GLOBAL_ORDER_KEY] {
            if let Err(e) = write_json(&self.store, key, &record) {
                warn!("Failed to save manual order '{}': {}", key, e);
            }
        }
        true
    }

    /// Fetch the current page, retrying after an error.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_fetch();
        let outcome =
            fetch_with_deadline(&self.source, &ticket.request, ticket.cancel.clone()).await;
        self.complete_fetch(ticket.id, outcome);
    }

    /// Dispatch a control event.
    pub async fn handle(&mut self, event: Event) {
        debug!("Event: {:?}", event);
        match event {
            Event::SearchTermChanged(term) => self.set_search_term(term),
            Event::CategoryChanged(category) => self.set_category(category).await,
            Event::SortKeyChanged(key) => self.set_sort_key(key).await,
            Event::PageRequested(page) => self.set_page(page).await,
            Event::NextPage => {
                self.next_page().await;
            }
            Event::PreviousPage => {
                self.previous_page().await;
            }
            Event::ResetRequested => self.reset_all().await,
            Event::DragEnded(outcome) => {
                self.apply_manual_order(outcome.source, outcome.destination);
            }
            Event::RefreshRequested => self.refresh().await,
        }
    }

    // ---------------------------------------------------------------------
    // Fetch lifecycle
    // ---------------------------------------------------------------------

    /// Start a fetch of the current page, superseding any in flight.
    ///
    /// The previous ticket's token is cancelled and its completion will be
    /// discarded.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        if let Some(old) = self.state.in_flight.take() {
            debug!("Superseding fetch #{}", old.id);
            old.cancel.cancel();
        }

        self.state.next_request_id += 1;
        let id = self.state.next_request_id;
        let cancel = CancellationToken::new();
        let request = FetchRequest {
            page: self.state.selection.page,
            limit: self.page_size,
            timeout: self.timeout,
        };

        self.state.in_flight = Some(InFlight {
            id,
            page: request.page,
            cancel: cancel.clone(),
        });
        self.state.loading = true;
        self.state.error = None;

        info!("Fetch #{} started for page {}", id, request.page);
        FetchTicket {
            id,
            request,
            cancel,
        }
    }

    /// Apply the outcome of fetch `id`. Returns `false` when the fetch had
    /// been superseded and the outcome was dropped.
    pub fn complete_fetch(&mut self, id: u64, outcome: Result<JobPage, FetchError>) -> bool {
        let fetched_page = match self.state.in_flight.take() {
            Some(current) if current.id == id => current.page,
            other => {
                self.state.in_flight = other;
                debug!("Discarding completion of superseded fetch #{}", id);
                return false;
            }
        };
        self.state.loading = false;

        match outcome {
            Ok(page) => {
                info!(
                    "Fetch #{} returned {} jobs ({} pages)",
                    id,
                    page.jobs.len(),
                    page.total_pages
                );
                self.state.jobs = page.jobs;
                self.state.total_pages = page.total_pages;
                self.state.error = None;
                self.state.has_loaded = true;
                self.state.loaded_page = Some(fetched_page);
                self.rederive();
            }
            Err(e) if e.is_cancelled() => {
                debug!("Fetch #{} cancelled", id);
            }
            Err(e) => {
                warn!(
                    "Fetch #{} failed: {} ({})",
                    id,
                    e,
                    e.detail().unwrap_or("no detail")
                );
                self.state.error = Some(e);
            }
        }
        true
    }

    // ---------------------------------------------------------------------
    // Read-only views
    // ---------------------------------------------------------------------

    pub fn displayed_jobs(&self) -> &[Job] {
        &self.state.displayed
    }

    /// Raw job set from the last successful fetch.
    pub fn jobs(&self) -> &[Job] {
        &self.state.jobs
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// User message of the last failed fetch.
    pub fn last_error(&self) -> Option<String> {
        self.state.error.as_ref().map(ToString::to_string)
    }

    pub fn total_pages(&self) -> u32 {
        self.state.total_pages
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    /// True after a drag until the next reset.
    pub fn is_sort_locked(&self) -> bool {
        self.state.manual_order_used
    }

    /// Drag is only allowed with no category restriction.
    pub fn is_drag_disabled(&self) -> bool {
        !self.state.selection.is_all_categories()
    }

    pub fn has_previous_page(&self) -> bool {
        self.state.selection.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.state.selection.page < self.state.total_pages
    }

    /// Pagination controls are shown for multi-page results with something
    /// on screen.
    pub fn shows_pagination(&self) -> bool {
        self.state.total_pages > 1 && !self.state.displayed.is_empty()
    }

    pub fn view_status(&self) -> ViewStatus {
        if self.state.loading {
            return ViewStatus::Loading;
        }
        if let Some(e) = &self.state.error {
            return ViewStatus::Error(e.to_string());
        }
        if !self.state.has_loaded {
            return ViewStatus::Idle;
        }
        if self.state.jobs.is_empty() {
            return ViewStatus::NoJobsAvailable;
        }
        if self.state.displayed.is_empty() {
            let term = &self.state.selection.search_term;
            return if term.is_empty() {
                ViewStatus::NoFilterResults
            } else {
                ViewStatus::NoSearchResults(term.clone())
            };
        }
        ViewStatus::Ready
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    /// Page the displayed jobs belong to. Differs from the selected page
    /// while a page change has not loaded.
    fn display_page(&self) -> u32 {
        self.state.loaded_page.unwrap_or(self.state.selection.page)
    }

    fn rederive(&mut self) {
        let page = self.display_page();
        let selection = &self.state.selection;
        let page_order = if selection.is_all_categories() {
            read_json::<OrderRecord, _>(&self.store, &page_order_key(page))
        } else {
            None
        };

        self.state.displayed = derive_displayed(&self.state.jobs, selection, page_order.as_ref());
        debug!(
            "Derived {} of {} jobs (manual order: {})",
            self.state.displayed.len(),
            self.state.jobs.len(),
            page_order.is_some()
        );
    }

    fn persist_selection(&self) {
        let snapshot = SavedFilters::from_selection(&self.state.selection);
        if let Err(e) = write_json(&self.store, USER_FILTERS_KEY, &snapshot) {
            warn!("Failed to save selection: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;
    use async_trait::async_trait;

    /// Source that must never be called.
    struct Unreachable;

    #[async_trait]
    impl JobSource for Unreachable {
        async fn fetch(
            &self,
            _request: &FetchRequest,
            _cancel: CancellationToken,
        ) -> Result<JobPage, FetchError> {
            Err(FetchError::network("unreachable"))
        }
    }

    fn engine() -> ReconciliationEngine<Unreachable, MemoryStore> {
        ReconciliationEngine::new(Unreachable, MemoryStore::new(), &PagingSettings::default())
    }

    fn page(ids: &[&str], total_pages: u32) -> JobPage {
        JobPage {
            jobs: ids.iter().map(|id| Job::new(*id, format!("Job {}", id))).collect(),
            total_pages,
        }
    }

    #[test]
    fn begin_fetch_uses_current_page_and_paging() {
        let mut engine = engine();
        let ticket = engine.begin_fetch();
        assert_eq!(ticket.request.page, 1);
        assert_eq!(ticket.request.limit, 10);
        assert_eq!(ticket.request.timeout, Duration::from_millis(5000));
        assert!(engine.is_loading());
        assert_eq!(engine.view_status(), ViewStatus::Loading);
    }

    #[test]
    fn superseded_ticket_is_cancelled_and_discarded() {
        let mut engine = engine();
        let first = engine.begin_fetch();
        let second = engine.begin_fetch();
        assert!(first.cancel.is_cancelled());
        assert!(!second.cancel.is_cancelled());

        assert!(!engine.complete_fetch(first.id, Ok(page(&["old"], 1))));
        assert!(engine.displayed_jobs().is_empty());
        assert!(engine.is_loading());

        assert!(engine.complete_fetch(second.id, Ok(page(&["new"], 1))));
        assert_eq!(engine.displayed_jobs()[0].id, "new");
        assert!(!engine.is_loading());
    }

    #[test]
    fn cancelled_outcome_is_not_an_error() {
        let mut engine = engine();
        let ticket = engine.begin_fetch();
        engine.complete_fetch(ticket.id, Err(FetchError::Cancelled));
        assert_eq!(engine.last_error(), None);
        assert!(!engine.is_loading());
    }

    #[test]
    fn search_term_is_persisted_and_local() {
        let mut engine = engine();
        let ticket = engine.begin_fetch();
        engine.complete_fetch(ticket.id, Ok(page(&["1", "2"], 1)));

        engine.set_search_term("job 2");
        assert_eq!(engine.displayed_jobs().len(), 1);
        assert!(!engine.is_loading());

        let saved: SavedFilters = read_json(engine.store(), USER_FILTERS_KEY).unwrap();
        assert_eq!(saved.search_term, "job 2");
    }

    #[test]
    fn view_status_distinguishes_empty_cases() {
        let mut engine = engine();
        assert_eq!(engine.view_status(), ViewStatus::Idle);

        let ticket = engine.begin_fetch();
        engine.complete_fetch(ticket.id, Ok(page(&[], 0)));
        assert_eq!(engine.view_status(), ViewStatus::NoJobsAvailable);

        let ticket = engine.begin_fetch();
        engine.complete_fetch(ticket.id, Ok(page(&["1"], 3)));
        assert_eq!(engine.view_status(), ViewStatus::Ready);
        assert!(engine.shows_pagination());
        assert!(engine.has_next_page());
        assert!(!engine.has_previous_page());

        engine.set_search_term("zzz");
        assert_eq!(
            engine.view_status(),
            ViewStatus::NoSearchResults("zzz".to_string())
        );
        assert!(!engine.shows_pagination());
    }

    #[test]
    fn drag_rejected_under_concrete_category() {
        let mut engine = engine();
        let ticket = engine.begin_fetch();
        engine.complete_fetch(ticket.id, Ok(page(&["1", "2"], 1)));
        engine.state.selection.category = "Human Resources".into();
        assert!(engine.is_drag_disabled());
        assert!(!engine.apply_manual_order(1, Some(0)));
        assert!(!engine.is_sort_locked());
    }
}
