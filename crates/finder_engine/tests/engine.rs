use std::sync::Arc;
use std::time::{Duration, Instant};

use finder_engine::{
    CatalogClient, CatalogDoc, EngineEvent, EngineHandle, FailureKind, FetchError, FetchMetadata,
    ProgressSink, SearchId, SearchOutput, SearchResponse,
};

/// Answers every search with one doc named after the title, after a per-title delay.
struct ScriptedClient;

#[async_trait::async_trait]
impl CatalogClient for ScriptedClient {
    async fn search(
        &self,
        _search_id: SearchId,
        title: &str,
        _sink: &dyn ProgressSink,
    ) -> Result<SearchOutput, FetchError> {
        let delay = if title == "slow" { 5_000 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        if title == "broken" {
            return Err(FetchError::new(FailureKind::Network, "connection reset"));
        }
        Ok(SearchOutput {
            response: SearchResponse {
                num_found: 1,
                docs: vec![CatalogDoc {
                    title: Some(title.to_string()),
                    ..CatalogDoc::default()
                }],
            },
            metadata: FetchMetadata {
                request_url: format!("scripted://{title}"),
                final_url: format!("scripted://{title}"),
                redirect_count: 0,
                content_type: Some("application/json".to_string()),
                byte_len: 0,
            },
        })
    }
}

fn completions(engine: &EngineHandle, wanted: usize) -> Vec<(SearchId, Result<SearchOutput, FetchError>)> {
    let deadline = Instant::now() + Duration::from_secs(3);
    let mut done = Vec::new();
    while done.len() < wanted && Instant::now() < deadline {
        if let Some(EngineEvent::SearchCompleted { search_id, result }) =
            engine.recv_timeout(Duration::from_millis(50))
        {
            done.push((search_id, result));
        }
    }
    done
}

fn init_logging() {
    finder_logging::initialize_for_tests();
}

#[test]
fn search_completes_with_decoded_output() {
    init_logging();
    let engine = EngineHandle::with_client(Arc::new(ScriptedClient)).unwrap();
    engine.search(1, "dune");

    let done = completions(&engine, 1);
    assert_eq!(done.len(), 1);
    let (search_id, result) = &done[0];
    assert_eq!(*search_id, 1);
    let output = result.as_ref().expect("search ok");
    assert_eq!(output.response.docs[0].title.as_deref(), Some("dune"));
}

#[test]
fn failures_are_reported_with_their_kind() {
    init_logging();
    let engine = EngineHandle::with_client(Arc::new(ScriptedClient)).unwrap();
    engine.search(4, "broken");

    let done = completions(&engine, 1);
    let err = done[0].1.as_ref().unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[test]
fn new_search_cancels_the_previous_one() {
    init_logging();
    let engine = EngineHandle::with_client(Arc::new(ScriptedClient)).unwrap();
    engine.search(1, "slow");
    engine.search(2, "emma");

    let mut done = completions(&engine, 2);
    done.sort_by_key(|(id, _)| *id);
    assert_eq!(done.len(), 2);

    let (first_id, first) = &done[0];
    assert_eq!(*first_id, 1);
    assert_eq!(first.as_ref().unwrap_err().kind, FailureKind::Cancelled);

    let (second_id, second) = &done[1];
    assert_eq!(*second_id, 2);
    assert!(second.is_ok());
}

#[test]
fn explicit_cancel_only_hits_the_current_search() {
    init_logging();
    let engine = EngineHandle::with_client(Arc::new(ScriptedClient)).unwrap();
    engine.search(3, "slow");
    engine.cancel(99);
    engine.cancel(3);

    let done = completions(&engine, 1);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].0, 3);
    assert_eq!(done[0].1.as_ref().unwrap_err().kind, FailureKind::Cancelled);
}
