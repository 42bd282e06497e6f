/// One catalog search result, as consumed by the finder.
///
/// Optional list fields use an empty `Vec` for "absent".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Book {
    pub title: String,
    pub authors: Vec<String>,
    pub cover_id: Option<u64>,
    pub first_publish_year: Option<i32>,
    pub publishers: Vec<String>,
    pub page_count: Option<u32>,
    pub isbns: Vec<String>,
    /// Catalog key, an absolute path such as `/works/OL82563W`.
    pub key: Option<String>,
}

impl Book {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn primary_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }

    pub fn first_publisher(&self) -> Option<&str> {
        self.publishers.first().map(String::as_str)
    }

    pub fn first_isbn(&self) -> Option<&str> {
        self.isbns.first().map(String::as_str)
    }
}
