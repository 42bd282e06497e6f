use crate::{AppState, Book, CatalogLinks, SearchStatus};

pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const RETRY_HINT: &str = "Please try another search term or check your connection.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub query: String,
    pub status: SearchStatus,
    pub loading: bool,
    /// The search control is disabled while a request is outstanding.
    pub search_enabled: bool,
    pub bytes_received: Option<u64>,
    pub error: Option<String>,
    /// "Found N books matching ..." once results are present.
    pub results_heading: Option<String>,
    pub cards: Vec<BookCardView>,
    /// Present only in the empty state.
    pub suggestions: Option<Vec<SuggestionView>>,
    pub detail: Option<BookDetailView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverView {
    Image { url: String },
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCardView {
    pub index: usize,
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
    pub cover: CoverView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionView {
    pub index: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetailView {
    pub title: String,
    pub authors: String,
    pub cover: CoverView,
    pub first_published: Option<i32>,
    pub publisher: Option<String>,
    pub pages: Option<u32>,
    pub isbn: Option<String>,
    pub catalog_url: Option<String>,
}

pub(crate) fn build(state: &AppState) -> AppViewModel {
    let links = &state.settings().links;
    let loading = state.is_loading();
    let error = state.error_message().map(str::to_string);

    let cards: Vec<BookCardView> = state
        .books()
        .iter()
        .enumerate()
        .map(|(index, book)| card_view(index, book, links))
        .collect();

    let results_heading = (!cards.is_empty()).then(|| {
        format!(
            "Found {} books matching \"{}\"",
            cards.len(),
            state.submitted_query().unwrap_or_default()
        )
    });

    let suggestions = (!loading && error.is_none() && cards.is_empty()).then(|| {
        state
            .settings()
            .suggestions
            .iter()
            .enumerate()
            .map(|(index, suggestion)| SuggestionView {
                index,
                label: suggestion.label.clone(),
            })
            .collect()
    });

    AppViewModel {
        query: state.query().to_string(),
        status: state.status(),
        loading,
        search_enabled: !loading,
        bytes_received: state.bytes_received(),
        error,
        results_heading,
        cards,
        suggestions,
        detail: state.selected().map(|book| detail_view(book, links)),
    }
}

fn cover_view(book: &Book, links: &CatalogLinks) -> CoverView {
    match book.cover_id {
        Some(id) => CoverView::Image {
            url: links.cover_url(id),
        },
        None => CoverView::Placeholder,
    }
}

fn card_view(index: usize, book: &Book, links: &CatalogLinks) -> BookCardView {
    BookCardView {
        index,
        title: book.title.clone(),
        author: book.primary_author().unwrap_or(UNKNOWN_AUTHOR).to_string(),
        year: book.first_publish_year,
        cover: cover_view(book, links),
    }
}

fn detail_view(book: &Book, links: &CatalogLinks) -> BookDetailView {
    let authors = if book.authors.is_empty() {
        UNKNOWN_AUTHOR.to_string()
    } else {
        book.authors.join(", ")
    };

    BookDetailView {
        title: book.title.clone(),
        authors,
        cover: cover_view(book, links),
        first_published: book.first_publish_year,
        publisher: book.first_publisher().map(str::to_string),
        pages: book.page_count,
        isbn: book.first_isbn().map(str::to_string),
        catalog_url: book.key.as_deref().map(|key| links.detail_url(key)),
    }
}
