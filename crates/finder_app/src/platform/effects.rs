use finder_core::{Book, Effect, Msg};
use finder_engine::{
    CatalogDoc, EngineError, EngineEvent, EngineHandle, FailureKind, FetchSettings,
};
use finder_logging::{finder_debug, finder_info, finder_warn};

/// Executes core effects and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new(settings)?,
        })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchCatalog { search_id, title } => {
                    finder_info!("FetchCatalog search_id={} title={:?}", search_id, title);
                    self.engine.search(search_id, title);
                }
                Effect::CancelSearch { search_id } => {
                    self.engine.cancel(search_id);
                }
                Effect::OpenLink { url } => {
                    finder_info!("OpenLink url={}", url);
                    if let Err(err) = open::that_detached(&url) {
                        finder_warn!("Could not open {}: {}", url, err);
                    }
                }
            }
        }
    }

    /// Everything the engine reported since the last call, as messages.
    pub fn drain_events(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = event_to_msg(event) {
                msgs.push(msg);
            }
        }
        msgs
    }
}

fn event_to_msg(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::Progress(progress) => progress.bytes.map(|bytes| Msg::SearchProgress {
            search_id: progress.search_id,
            bytes,
        }),
        EngineEvent::SearchCompleted { search_id, result } => match result {
            Ok(output) => {
                finder_debug!(
                    "search {} decoded num_found={} docs={}",
                    search_id,
                    output.response.num_found,
                    output.response.docs.len()
                );
                let books = output.response.docs.into_iter().map(book_from_doc).collect();
                Some(Msg::SearchSucceeded { search_id, books })
            }
            Err(err) => {
                if err.kind == FailureKind::Cancelled {
                    finder_debug!("search {} cancelled", search_id);
                } else {
                    finder_warn!("search {} failed: {}", search_id, err);
                }
                Some(Msg::SearchFailed { search_id })
            }
        },
    }
}

fn book_from_doc(doc: CatalogDoc) -> Book {
    Book {
        title: doc.title.unwrap_or_default(),
        authors: doc.author_name.unwrap_or_default(),
        cover_id: doc.cover_i,
        first_publish_year: doc.first_publish_year,
        publishers: doc.publisher.unwrap_or_default(),
        page_count: doc.number_of_pages_median,
        isbns: doc.isbn.unwrap_or_default(),
        key: doc.key,
    }
}
