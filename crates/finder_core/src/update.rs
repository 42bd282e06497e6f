use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged(query) => {
            state.set_query(query);
            Vec::new()
        }
        Msg::SearchSubmitted => start_search(&mut state),
        Msg::SuggestionActivated(index) => {
            let Some(query) = state
                .settings()
                .suggestions
                .get(index)
                .map(|suggestion| suggestion.query.clone())
            else {
                return (state, Vec::new());
            };
            state.set_query(query);
            start_search(&mut state)
        }
        Msg::SearchProgress { search_id, bytes } => {
            state.apply_progress(search_id, bytes);
            Vec::new()
        }
        Msg::SearchSucceeded { search_id, books } => {
            state.apply_results(search_id, books);
            Vec::new()
        }
        Msg::SearchFailed { search_id } => {
            state.apply_failure(search_id);
            Vec::new()
        }
        Msg::BookClicked(index) => {
            state.select(index);
            Vec::new()
        }
        Msg::BackdropClicked | Msg::CloseClicked => {
            state.clear_selection();
            Vec::new()
        }
        Msg::OpenCatalogPageClicked => open_link(&state, |links, book| {
            book.key.as_deref().map(|key| links.detail_url(key))
        }),
        Msg::OpenCoverClicked => open_link(&state, |links, book| {
            book.cover_id.map(|id| links.cover_url(id))
        }),
        Msg::PanelClicked | Msg::Tick => Vec::new(),
    };

    (state, effects)
}

fn start_search(state: &mut AppState) -> Vec<Effect> {
    let title = state.query().trim().to_string();
    if title.is_empty() {
        return Vec::new();
    }

    let (search_id, superseded) = state.begin_search(&title);
    let mut effects = Vec::with_capacity(2);
    if let Some(old) = superseded {
        effects.push(Effect::CancelSearch { search_id: old });
    }
    effects.push(Effect::FetchCatalog { search_id, title });
    effects
}

fn open_link(
    state: &AppState,
    build: impl FnOnce(&crate::CatalogLinks, &crate::Book) -> Option<String>,
) -> Vec<Effect> {
    state
        .selected()
        .and_then(|book| build(&state.settings().links, book))
        .map(|url| vec![Effect::OpenLink { url }])
        .unwrap_or_default()
}
