use url::Url;

pub const DEFAULT_WEB_BASE: &str = "https://openlibrary.org";
pub const DEFAULT_COVERS_BASE: &str = "https://covers.openlibrary.org";

/// Size variant requested from the cover service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverSize {
    Small,
    Medium,
    #[default]
    Large,
}

impl CoverSize {
    fn suffix(self) -> char {
        match self {
            CoverSize::Small => 'S',
            CoverSize::Medium => 'M',
            CoverSize::Large => 'L',
        }
    }
}

/// Base addresses for the catalog's human-facing pages and cover images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLinks {
    web_base: String,
    covers_base: String,
    cover_size: CoverSize,
}

impl Default for CatalogLinks {
    fn default() -> Self {
        Self {
            web_base: DEFAULT_WEB_BASE.to_string(),
            covers_base: DEFAULT_COVERS_BASE.to_string(),
            cover_size: CoverSize::default(),
        }
    }
}

impl CatalogLinks {
    /// Both bases must be absolute URLs; a trailing slash is dropped.
    pub fn new(
        web_base: &str,
        covers_base: &str,
        cover_size: CoverSize,
    ) -> Result<Self, url::ParseError> {
        Url::parse(web_base)?;
        Url::parse(covers_base)?;
        Ok(Self {
            web_base: web_base.trim_end_matches('/').to_string(),
            covers_base: covers_base.trim_end_matches('/').to_string(),
            cover_size,
        })
    }

    pub fn cover_url(&self, cover_id: u64) -> String {
        format!(
            "{}/b/id/{}-{}.jpg",
            self.covers_base,
            cover_id,
            self.cover_size.suffix()
        )
    }

    /// Catalog keys are absolute paths, so the link is a plain concatenation.
    pub fn detail_url(&self, key: &str) -> String {
        format!("{}{}", self.web_base, key)
    }
}
