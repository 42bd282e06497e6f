//! Book finder engine: catalog IO and background search execution.
mod decode;
mod engine;
mod fetch;
mod types;

pub use decode::{decode_search_response, DecodeError};
pub use engine::EngineHandle;
pub use fetch::{
    CatalogClient, ChannelProgressSink, FetchSettings, ProgressSink, ReqwestCatalogClient,
    DEFAULT_SEARCH_ENDPOINT,
};
pub use types::{
    CatalogDoc, EngineError, EngineEvent, FailureKind, FetchError, FetchMetadata, SearchId,
    SearchOutput, SearchProgress, SearchResponse, Stage,
};
