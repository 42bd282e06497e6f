use std::sync::Once;

use finder_core::{
    update, AppState, Book, Effect, Msg, SearchSettings, SearchStatus, FETCH_FAILED_MESSAGE,
    NO_RESULTS_MESSAGE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(finder_logging::initialize_for_tests);
}

fn submit_query(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::QueryChanged(input.to_string()));
    update(state, Msg::SearchSubmitted)
}

fn books(count: usize) -> Vec<Book> {
    (0..count).map(|i| Book::new(format!("Book {i}"))).collect()
}

#[test]
fn whitespace_query_does_not_search() {
    init_logging();
    for input in ["", "   ", "\t\n "] {
        let (mut next, effects) = submit_query(AppState::new(), input);
        assert!(effects.is_empty());
        assert_eq!(next.status(), SearchStatus::Idle);
        assert_eq!(next.in_flight(), None);
        next.consume_dirty();

        let (mut again, effects) = update(next, Msg::SearchSubmitted);
        assert!(effects.is_empty());
        assert!(!again.consume_dirty());
    }
}

#[test]
fn submit_trims_query_and_starts_loading() {
    init_logging();
    let (mut state, effects) = submit_query(AppState::new(), "  the hobbit ");

    assert_eq!(
        effects,
        vec![Effect::FetchCatalog {
            search_id: 1,
            title: "the hobbit".to_string(),
        }]
    );
    assert!(state.is_loading());
    assert_eq!(state.query(), "  the hobbit ");
    assert_eq!(state.submitted_query(), Some("the hobbit"));
    assert_eq!(state.error_message(), None);
    assert!(state.consume_dirty());

    let view = state.view();
    assert!(view.loading);
    assert!(!view.search_enabled);
    assert!(view.suggestions.is_none());
}

#[test]
fn results_are_capped_at_twenty_in_catalog_order() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "dune");
    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            search_id: 1,
            books: books(35),
        },
    );

    assert_eq!(state.status(), SearchStatus::Found);
    assert!(!state.is_loading());
    assert_eq!(state.error_message(), None);
    let titles: Vec<_> = state.books().iter().map(|b| b.title.clone()).collect();
    let expected: Vec<_> = (0..20).map(|i| format!("Book {i}")).collect();
    assert_eq!(titles, expected);
}

#[test]
fn zero_result_limit_still_keeps_one_book() {
    init_logging();
    let settings = SearchSettings {
        result_limit: 0,
        ..SearchSettings::default()
    };
    let (state, _) = submit_query(AppState::with_settings(settings), "dune");
    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            search_id: 1,
            books: books(3),
        },
    );

    assert_eq!(state.status(), SearchStatus::Found);
    assert_eq!(state.books().len(), 1);
    assert_eq!(state.view().cards.len(), 1);
}

#[test]
fn fewer_results_than_the_cap_are_kept_whole() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "dune");
    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            search_id: 1,
            books: books(3),
        },
    );
    assert_eq!(state.books().len(), 3);
    assert_eq!(state.books()[2].title, "Book 2");
}

#[test]
fn result_limit_comes_from_settings() {
    init_logging();
    let settings = SearchSettings {
        result_limit: 5,
        ..SearchSettings::default()
    };
    let (state, _) = submit_query(AppState::with_settings(settings), "dune");
    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            search_id: 1,
            books: books(8),
        },
    );
    assert_eq!(state.books().len(), 5);
}

#[test]
fn zero_results_sets_no_results_message() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "zzzzqqqq");
    let (state, effects) = update(
        state,
        Msg::SearchSucceeded {
            search_id: 1,
            books: Vec::new(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.status(), SearchStatus::NoResults);
    assert!(!state.is_loading());
    assert!(state.books().is_empty());
    assert_eq!(state.error_message(), Some(NO_RESULTS_MESSAGE));
}

#[test]
fn failure_sets_generic_message_and_clears_loading() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "dune");
    let (state, _) = update(state, Msg::SearchFailed { search_id: 1 });

    assert_eq!(state.status(), SearchStatus::Failed);
    assert!(!state.is_loading());
    assert!(state.books().is_empty());
    assert_eq!(state.error_message(), Some(FETCH_FAILED_MESSAGE));
    assert_eq!(state.in_flight(), None);
}

#[test]
fn new_search_discards_previous_results_and_error() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "dune");
    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            search_id: 1,
            books: books(4),
        },
    );
    let (state, _) = submit_query(state, "emma");
    assert!(state.books().is_empty());
    assert!(state.is_loading());

    let (state, _) = update(state, Msg::SearchFailed { search_id: 2 });
    let (state, _) = submit_query(state, "emma");
    assert_eq!(state.error_message(), None);
    assert_eq!(state.in_flight(), Some(3));
}

#[test]
fn resubmitting_while_loading_cancels_the_previous_search() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "dune");
    let (state, effects) = submit_query(state, "emma");

    assert_eq!(
        effects,
        vec![
            Effect::CancelSearch { search_id: 1 },
            Effect::FetchCatalog {
                search_id: 2,
                title: "emma".to_string(),
            },
        ]
    );
    assert_eq!(state.in_flight(), Some(2));
}

#[test]
fn stale_outcomes_are_ignored() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "dune");
    let (mut state, _) = submit_query(state, "emma");
    state.consume_dirty();

    let (mut state, _) = update(
        state,
        Msg::SearchSucceeded {
            search_id: 1,
            books: books(2),
        },
    );
    assert!(state.is_loading());
    assert!(state.books().is_empty());
    assert!(!state.consume_dirty());

    let (mut state, _) = update(state, Msg::SearchFailed { search_id: 1 });
    assert!(state.is_loading());
    assert!(!state.consume_dirty());

    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            search_id: 2,
            books: books(1),
        },
    );
    assert_eq!(state.status(), SearchStatus::Found);
    assert_eq!(state.submitted_query(), Some("emma"));
}

#[test]
fn outcome_after_completion_is_ignored() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "dune");
    let (state, _) = update(state, Msg::SearchFailed { search_id: 1 });
    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            search_id: 1,
            books: books(2),
        },
    );
    assert_eq!(state.status(), SearchStatus::Failed);
    assert!(state.books().is_empty());
}

#[test]
fn progress_updates_only_the_current_search() {
    init_logging();
    let (state, _) = submit_query(AppState::new(), "dune");
    let (state, _) = update(
        state,
        Msg::SearchProgress {
            search_id: 1,
            bytes: 2048,
        },
    );
    assert_eq!(state.view().bytes_received, Some(2048));

    let (state, _) = update(
        state,
        Msg::SearchProgress {
            search_id: 7,
            bytes: 1,
        },
    );
    assert_eq!(state.bytes_received(), Some(2048));

    let (state, _) = update(state, Msg::SearchFailed { search_id: 1 });
    assert_eq!(state.bytes_received(), None);
}

#[test]
fn suggestion_searches_with_its_own_query() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SuggestionActivated(2));

    assert_eq!(state.query(), "Pride and Prejudice");
    assert_eq!(
        effects,
        vec![Effect::FetchCatalog {
            search_id: 1,
            title: "Pride and Prejudice".to_string(),
        }]
    );
}

#[test]
fn unknown_suggestion_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::SuggestionActivated(99));
    assert_eq!(next, state);
    assert!(effects.is_empty());
}
