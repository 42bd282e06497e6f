use std::fmt;

use serde::Deserialize;

use crate::decode::{docs_or_empty, lenient, lenient_count};

pub type SearchId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Connecting,
    Downloading,
    Decoding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchProgress {
    pub search_id: SearchId,
    pub stage: Stage,
    pub bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(SearchProgress),
    SearchCompleted {
        search_id: SearchId,
        result: Result<SearchOutput, FetchError>,
    },
}

/// One document of the catalog's search response.
///
/// Only the consumed fields are modelled; everything is optional because
/// the catalog omits (or nulls) fields freely. A field of the wrong type is
/// read as absent instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CatalogDoc {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub author_name: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub cover_i: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub first_publish_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub publisher: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub number_of_pages_median: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub isbn: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "numFound", default, deserialize_with = "lenient_count")]
    pub num_found: u64,
    /// A missing or null `docs` is zero results. Entries that are not
    /// objects are skipped.
    #[serde(default, deserialize_with = "docs_or_empty")]
    pub docs: Vec<CatalogDoc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutput {
    pub response: SearchResponse,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub request_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    Cancelled,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Spawn(#[source] std::io::Error),
}
