//! Book finder core: pure search state machine and view-model helpers.
mod book;
mod effect;
mod links;
mod msg;
mod settings;
mod state;
mod update;
mod view_model;

pub use book::Book;
pub use effect::Effect;
pub use links::{CatalogLinks, CoverSize, DEFAULT_COVERS_BASE, DEFAULT_WEB_BASE};
pub use msg::Msg;
pub use settings::{SearchSettings, Suggestion, DEFAULT_RESULT_LIMIT};
pub use state::{AppState, SearchId, SearchStatus, FETCH_FAILED_MESSAGE, NO_RESULTS_MESSAGE};
pub use update::update;
pub use view_model::{
    AppViewModel, BookCardView, BookDetailView, CoverView, SuggestionView, RETRY_HINT,
    UNKNOWN_AUTHOR,
};
