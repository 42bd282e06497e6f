use crate::CatalogLinks;

/// Number of results kept from one search response.
pub const DEFAULT_RESULT_LIMIT: usize = 20;

/// A canned search offered while nothing has been searched yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub query: String,
}

impl Suggestion {
    pub fn new(label: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            query: query.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub result_limit: usize,
    pub suggestions: Vec<Suggestion>,
    pub links: CatalogLinks,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
            suggestions: default_suggestions(),
            links: CatalogLinks::default(),
        }
    }
}

fn default_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion::new("Harry Potter", "Harry Potter"),
        Suggestion::new("The Hobbit", "The Hobbit"),
        Suggestion::new("Jane Austen", "Pride and Prejudice"),
        Suggestion::new("1984", "1984"),
    ]
}
