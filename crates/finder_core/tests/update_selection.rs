use finder_core::{update, AppState, Book, Effect, Msg};

fn init_logging() {
    finder_logging::initialize_for_tests();
}

fn hobbit() -> Book {
    Book {
        title: "The Hobbit".to_string(),
        authors: vec!["J.R.R. Tolkien".to_string()],
        cover_id: Some(6_979_861),
        first_publish_year: Some(1937),
        publishers: vec!["Allen & Unwin".to_string()],
        page_count: Some(310),
        isbns: vec!["9780261103344".to_string()],
        key: Some("/works/OL262758W".to_string()),
    }
}

fn state_with_results() -> AppState {
    let (state, _) = update(AppState::new(), Msg::QueryChanged("hobbit".to_string()));
    let (state, _) = update(state, Msg::SearchSubmitted);
    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            search_id: 1,
            books: vec![Book::new("Unrelated"), hobbit()],
        },
    );
    state
}

#[test]
fn clicking_a_card_selects_that_exact_record() {
    init_logging();
    let (mut state, effects) = update(state_with_results(), Msg::BookClicked(1));

    assert!(effects.is_empty());
    assert_eq!(state.selected(), Some(&hobbit()));
    assert!(state.consume_dirty());
    assert_eq!(state.books().len(), 2);
}

#[test]
fn clicking_out_of_range_selects_nothing() {
    init_logging();
    let (state, _) = update(state_with_results(), Msg::BookClicked(5));
    assert_eq!(state.selected(), None);
}

#[test]
fn backdrop_and_close_clear_the_selection() {
    init_logging();
    for dismiss in [Msg::BackdropClicked, Msg::CloseClicked] {
        let (state, _) = update(state_with_results(), Msg::BookClicked(1));
        let (state, effects) = update(state, dismiss);
        assert!(effects.is_empty());
        assert_eq!(state.selected(), None);
        assert!(state.view().detail.is_none());
    }
}

#[test]
fn clicks_inside_the_panel_keep_it_open() {
    init_logging();
    let (mut state, _) = update(state_with_results(), Msg::BookClicked(1));
    state.consume_dirty();

    let (mut state, effects) = update(state, Msg::PanelClicked);
    assert!(effects.is_empty());
    assert_eq!(state.selected(), Some(&hobbit()));
    assert!(!state.consume_dirty());
}

#[test]
fn dismissing_without_selection_is_quiet() {
    init_logging();
    let mut state = state_with_results();
    state.consume_dirty();
    let (mut state, _) = update(state, Msg::BackdropClicked);
    assert!(!state.consume_dirty());
}

#[test]
fn selection_survives_a_new_search() {
    init_logging();
    let (state, _) = update(state_with_results(), Msg::BookClicked(1));
    let (state, _) = update(state, Msg::SearchSubmitted);
    assert!(state.is_loading());
    assert_eq!(state.selected(), Some(&hobbit()));
}

#[test]
fn open_links_for_the_selected_book() {
    init_logging();
    let (state, _) = update(state_with_results(), Msg::BookClicked(1));

    let (state, effects) = update(state, Msg::OpenCatalogPageClicked);
    assert_eq!(
        effects,
        vec![Effect::OpenLink {
            url: "https://openlibrary.org/works/OL262758W".to_string(),
        }]
    );

    let (_state, effects) = update(state, Msg::OpenCoverClicked);
    assert_eq!(
        effects,
        vec![Effect::OpenLink {
            url: "https://covers.openlibrary.org/b/id/6979861-L.jpg".to_string(),
        }]
    );
}

#[test]
fn open_links_need_a_selection_and_the_field() {
    init_logging();
    let (state, effects) = update(state_with_results(), Msg::OpenCatalogPageClicked);
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::BookClicked(0));
    let (state, effects) = update(state, Msg::OpenCatalogPageClicked);
    assert!(effects.is_empty());
    let (_state, effects) = update(state, Msg::OpenCoverClicked);
    assert!(effects.is_empty());
}
