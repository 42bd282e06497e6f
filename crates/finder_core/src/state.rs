use crate::view_model::{self, AppViewModel};
use crate::{Book, SearchSettings};

/// Generation number of a search; a larger id supersedes every smaller one.
pub type SearchId = u64;

pub const NO_RESULTS_MESSAGE: &str = "No books found. Try a different search term.";
pub const FETCH_FAILED_MESSAGE: &str = "Error fetching data. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// Nothing searched yet.
    #[default]
    Idle,
    Loading,
    Found,
    NoResults,
    Failed,
}

impl SearchStatus {
    pub fn error_message(self) -> Option<&'static str> {
        match self {
            SearchStatus::NoResults => Some(NO_RESULTS_MESSAGE),
            SearchStatus::Failed => Some(FETCH_FAILED_MESSAGE),
            SearchStatus::Idle | SearchStatus::Loading | SearchStatus::Found => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    settings: SearchSettings,
    query: String,
    submitted_query: Option<String>,
    status: SearchStatus,
    books: Vec<Book>,
    selected: Option<Book>,
    last_search_id: SearchId,
    in_flight: Option<SearchId>,
    bytes_received: Option<u64>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SearchSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        view_model::build(self)
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Trimmed query of the current or most recent search.
    pub fn submitted_query(&self) -> Option<&str> {
        self.submitted_query.as_deref()
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.status.error_message()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn selected(&self) -> Option<&Book> {
        self.selected.as_ref()
    }

    pub fn in_flight(&self) -> Option<SearchId> {
        self.in_flight
    }

    pub fn bytes_received(&self) -> Option<u64> {
        self.bytes_received
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_query(&mut self, query: String) {
        if self.query != query {
            self.query = query;
            self.mark_dirty();
        }
    }

    /// Starts a new search generation for `title`.
    ///
    /// Returns the new id and the id of the search it supersedes, if any.
    pub(crate) fn begin_search(&mut self, title: &str) -> (SearchId, Option<SearchId>) {
        let superseded = self.in_flight.take();
        self.last_search_id += 1;
        let search_id = self.last_search_id;
        self.in_flight = Some(search_id);
        self.submitted_query = Some(title.to_string());
        self.status = SearchStatus::Loading;
        self.books.clear();
        self.bytes_received = None;
        self.mark_dirty();
        (search_id, superseded)
    }

    fn is_current(&self, search_id: SearchId) -> bool {
        self.in_flight == Some(search_id)
    }

    pub(crate) fn apply_progress(&mut self, search_id: SearchId, bytes: u64) -> bool {
        if !self.is_current(search_id) {
            return false;
        }
        self.bytes_received = Some(bytes);
        self.mark_dirty();
        true
    }

    pub(crate) fn apply_results(&mut self, search_id: SearchId, mut books: Vec<Book>) -> bool {
        if !self.is_current(search_id) {
            return false;
        }
        self.finish_search();
        if books.is_empty() {
            self.status = SearchStatus::NoResults;
        } else {
            // A zero limit would leave `Found` with nothing to show.
            books.truncate(self.settings.result_limit.max(1));
            self.books = books;
            self.status = SearchStatus::Found;
        }
        true
    }

    pub(crate) fn apply_failure(&mut self, search_id: SearchId) -> bool {
        if !self.is_current(search_id) {
            return false;
        }
        self.finish_search();
        self.status = SearchStatus::Failed;
        true
    }

    fn finish_search(&mut self) {
        self.in_flight = None;
        self.bytes_received = None;
        self.books.clear();
        self.mark_dirty();
    }

    pub(crate) fn select(&mut self, index: usize) -> bool {
        let Some(book) = self.books.get(index) else {
            return false;
        };
        if self.selected.as_ref() != Some(book) {
            self.selected = Some(book.clone());
            self.mark_dirty();
        }
        true
    }

    pub(crate) fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.mark_dirty();
        }
    }
}
