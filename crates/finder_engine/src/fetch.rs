use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use finder_logging::finder_debug;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use crate::decode::decode_search_response;
use crate::{
    EngineEvent, FailureKind, FetchError, FetchMetadata, SearchId, SearchOutput, SearchProgress,
    Stage,
};

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://openlibrary.org/search.json";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub search_endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 16 * 1024 * 1024,
            allowed_content_types: vec!["application/json".to_string(), "text/json".to_string()],
            user_agent: concat!("book_finder/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Searches the book catalog by title.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    async fn search(
        &self,
        search_id: SearchId,
        title: &str,
        sink: &dyn ProgressSink,
    ) -> Result<SearchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCatalogClient {
    settings: FetchSettings,
}

impl ReqwestCatalogClient {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    /// `{endpoint}?title={title}` with the title form-encoded.
    pub fn search_url(&self, title: &str) -> Result<Url, FetchError> {
        Url::parse_with_params(&self.settings.search_endpoint, &[("title", title)])
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn build_client(&self, redirect_counter: Arc<AtomicUsize>) -> Result<reqwest::Client, FetchError> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let count = attempt.previous().len();
            redirect_counter.store(count, Ordering::Relaxed);
            if count >= redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(policy)
            .user_agent(self.settings.user_agent.clone())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    fn check_size(&self, actual: u64) -> Result<(), FetchError> {
        if actual > self.settings.max_bytes {
            return Err(FetchError::new(
                FailureKind::TooLarge {
                    max_bytes: self.settings.max_bytes,
                    actual: Some(actual),
                },
                "response too large",
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CatalogClient for ReqwestCatalogClient {
    async fn search(
        &self,
        search_id: SearchId,
        title: &str,
        sink: &dyn ProgressSink,
    ) -> Result<SearchOutput, FetchError> {
        let url = self.search_url(title)?;
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = self.build_client(redirect_counter.clone())?;

        sink.emit(EngineEvent::Progress(SearchProgress {
            search_id,
            stage: Stage::Connecting,
            bytes: None,
        }));
        finder_debug!("search {} GET {}", search_id, url);

        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            self.check_size(content_len)?;
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            self.check_size(bytes.len() as u64 + chunk.len() as u64)?;
            bytes.extend_from_slice(&chunk);
            sink.emit(EngineEvent::Progress(SearchProgress {
                search_id,
                stage: Stage::Downloading,
                bytes: Some(bytes.len() as u64),
            }));
        }

        sink.emit(EngineEvent::Progress(SearchProgress {
            search_id,
            stage: Stage::Decoding,
            bytes: Some(bytes.len() as u64),
        }));
        let response = decode_search_response(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

        let metadata = FetchMetadata {
            request_url: url.to_string(),
            final_url,
            redirect_count: redirect_counter.load(Ordering::Relaxed),
            content_type,
            byte_len: bytes.len() as u64,
        };

        Ok(SearchOutput { response, metadata })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
