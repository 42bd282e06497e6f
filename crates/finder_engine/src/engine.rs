use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use finder_logging::{finder_debug, finder_info, finder_warn};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::fetch::{CatalogClient, ChannelProgressSink, FetchSettings, ReqwestCatalogClient};
use crate::{EngineError, EngineEvent, FailureKind, FetchError, SearchId};

enum EngineCommand {
    Search { search_id: SearchId, title: String },
    Cancel { search_id: SearchId },
}

/// Runs catalog searches on a background runtime.
///
/// At most one search is current: starting a new one cancels the previous.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        Self::with_client(Arc::new(ReqwestCatalogClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn CatalogClient>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("finder-engine-worker")
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("finder-engine".to_string())
            .spawn(move || run_commands(runtime, client, cmd_rx, event_tx))
            .map_err(EngineError::Spawn)?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn search(&self, search_id: SearchId, title: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Search {
            search_id,
            title: title.into(),
        });
    }

    pub fn cancel(&self, search_id: SearchId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { search_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn run_commands(
    runtime: Runtime,
    client: Arc<dyn CatalogClient>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut current: Option<(SearchId, CancellationToken)> = None;

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Search { search_id, title } => {
                if let Some((previous, token)) = current.take() {
                    finder_debug!("search {} superseded by {}", previous, search_id);
                    token.cancel();
                }
                let token = CancellationToken::new();
                current = Some((search_id, token.clone()));

                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    run_search(client.as_ref(), search_id, title, token, event_tx).await;
                });
            }
            EngineCommand::Cancel { search_id } => match current.take() {
                Some((id, token)) if id == search_id => {
                    finder_debug!("search {} cancelled", search_id);
                    token.cancel();
                }
                other => current = other,
            },
        }
    }

    if let Some((_, token)) = current {
        token.cancel();
    }
    runtime.shutdown_background();
}

async fn run_search(
    client: &dyn CatalogClient,
    search_id: SearchId,
    title: String,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    finder_info!("search {} started title_len={}", search_id, title.len());
    let sink = ChannelProgressSink::new(event_tx.clone());

    let result = tokio::select! {
        biased;
        _ = token.cancelled() => Err(FetchError::new(FailureKind::Cancelled, "search superseded")),
        result = client.search(search_id, &title, &sink) => result,
    };

    match &result {
        Ok(output) => {
            let metadata = &output.metadata;
            if metadata.redirect_count > 0 {
                finder_debug!(
                    "search {} redirected {} -> {} hops={}",
                    search_id,
                    metadata.request_url,
                    metadata.final_url,
                    metadata.redirect_count
                );
            }
            finder_info!(
                "search {} finished docs={} num_found={} bytes={} content_type={}",
                search_id,
                output.response.docs.len(),
                output.response.num_found,
                metadata.byte_len,
                metadata.content_type.as_deref().unwrap_or("-")
            )
        }
        Err(err) if err.kind == FailureKind::Cancelled => {
            finder_debug!("search {} dropped: {}", search_id, err)
        }
        Err(err) => finder_warn!("search {} failed: {}", search_id, err),
    }

    let _ = event_tx.send(EngineEvent::SearchCompleted { search_id, result });
}
