use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{CatalogDoc, SearchResponse};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid catalog response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a catalog search response body. Unknown fields are ignored.
pub fn decode_search_response(bytes: &[u8]) -> Result<SearchResponse, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Reads an optional field, treating null or a value of the wrong type as absent.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// `docs` must be an array when present; null counts as empty.
pub(crate) fn docs_or_empty<'de, D>(deserializer: D) -> Result<Vec<CatalogDoc>, D::Error>
where
    D: Deserializer<'de>,
{
    let docs: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(docs
        .unwrap_or_default()
        .into_iter()
        .filter_map(|doc| CatalogDoc::deserialize(doc).ok())
        .collect())
}
