#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search input.
    QueryChanged(String),
    /// User pressed Enter in the input or clicked Search.
    SearchSubmitted,
    /// User activated one of the suggested searches (index into the suggestions).
    SuggestionActivated(usize),
    /// Engine progress for a search.
    SearchProgress {
        search_id: crate::SearchId,
        bytes: u64,
    },
    /// Engine returned a decoded response for a search.
    SearchSucceeded {
        search_id: crate::SearchId,
        books: Vec<crate::Book>,
    },
    /// Engine failed a search (transport, status, decoding, cancellation).
    SearchFailed { search_id: crate::SearchId },
    /// User clicked a result card (index into the current results).
    BookClicked(usize),
    /// Click landed inside the detail panel.
    PanelClicked,
    /// Click landed on the backdrop around the detail panel.
    BackdropClicked,
    /// User activated the detail panel's close control.
    CloseClicked,
    /// User asked to open the selected book on the catalog site.
    OpenCatalogPageClicked,
    /// User asked to open the selected book's cover image.
    OpenCoverClicked,
    /// UI/render tick.
    Tick,
}
