use crate::SearchId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one catalog search by title.
    FetchCatalog { search_id: SearchId, title: String },
    /// Abort a search that has been superseded.
    CancelSearch { search_id: SearchId },
    /// Open an outbound link in the system browser.
    OpenLink { url: String },
}
