//! Live search bound to an input element.
//!
//! Every key release on the input either clears the results container or
//! sends the current value to the search endpoint and renders whatever markup
//! comes back. Each key release starts a new generation: the request of the
//! previous generation is aborted, and a response that still arrives for an
//! older generation is dropped instead of overwriting newer results.

use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{AbortHandle, AbortRegistration, Abortable};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{
    client::SearchClient,
    config::SearchConfig,
    dom::{Document, Element},
    errors::SelectorError,
};

/// Data attribute on the input element naming the endpoint.
pub const SEARCH_URL_ATTRIBUTE: &str = "search-url";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response body replaced the results.
    Rendered,
    /// The request failed; the results were left as they were.
    Failed,
    /// A newer key release arrived before the response did.
    Superseded,
    /// The request was aborted before it completed.
    Cancelled,
}

pub struct Dispatch {
    pub generation: u64,
    pub query: String,
    pub endpoint: String,
    task: JoinHandle<FetchOutcome>,
}

impl Dispatch {
    pub async fn finished(self) -> FetchOutcome {
        self.task.await.unwrap_or(FetchOutcome::Cancelled)
    }
}

pub enum KeystrokeOutcome {
    Cleared,
    Dispatched(Dispatch),
}

#[derive(Default)]
struct InFlight {
    generation: u64,
    abort: Option<AbortHandle>,
}

pub struct SearchInputWatcher {
    config: SearchConfig,
    input: Arc<Element>,
    results: Arc<Element>,
    client: Arc<dyn SearchClient>,
    in_flight: Arc<Mutex<InFlight>>,
}

impl SearchInputWatcher {
    pub fn attach(
        config: SearchConfig,
        document: &Document,
        client: Arc<dyn SearchClient>,
    ) -> Result<Self, SelectorError> {
        let input = document.select(&config.input_selector)?;
        let results = document.select(&config.results_selector)?;

        Ok(Self {
            config,
            input,
            results,
            client,
            in_flight: Arc::new(Mutex::new(InFlight::default())),
        })
    }

    /// Listens for key releases on the input element. Key releases must be
    /// fired from inside a tokio runtime.
    pub fn bind(self: &Arc<Self>, document: &Document) -> Result<(), SelectorError> {
        let watcher = Arc::clone(self);
        document.on_key_up(
            &self.config.input_selector,
            Arc::new(move || {
                watcher.on_key_up();
            }),
        )
    }

    /// The endpoint is read from the input on every key release.
    pub fn endpoint(&self) -> String {
        self.input
            .data(SEARCH_URL_ATTRIBUTE)
            .unwrap_or_else(|| self.config.endpoint_url.clone())
    }

    pub fn on_key_up(&self) -> KeystrokeOutcome {
        let query = self.input.value();
        let endpoint = self.endpoint();

        let mut in_flight = lock(&self.in_flight);
        in_flight.generation += 1;
        if let Some(abort) = in_flight.abort.take() {
            abort.abort();
        }

        let generation = in_flight.generation;
        if !self.config.should_search(&query) {
            debug!("[{}] Query {:?} too short, clearing results", generation, query);
            self.results.set_inner_html("");
            return KeystrokeOutcome::Cleared;
        }

        let (abort, registration) = AbortHandle::new_pair();
        in_flight.abort = Some(abort);
        drop(in_flight);

        debug!("[{}] Searching {} for {:?}", generation, endpoint, query);
        let task = tokio::spawn(fetch_and_render(
            Arc::clone(&self.client),
            Arc::clone(&self.results),
            Arc::clone(&self.in_flight),
            generation,
            endpoint.clone(),
            query.clone(),
            registration,
        ));

        KeystrokeOutcome::Dispatched(Dispatch {
            generation,
            query,
            endpoint,
            task,
        })
    }
}

async fn fetch_and_render(
    client: Arc<dyn SearchClient>,
    results: Arc<Element>,
    in_flight: Arc<Mutex<InFlight>>,
    generation: u64,
    endpoint: String,
    query: String,
    registration: AbortRegistration,
) -> FetchOutcome {
    let fetch = Abortable::new(client.fetch(&endpoint, &query), registration);

    match fetch.await {
        Err(_) => {
            debug!("[{}] Search for {:?} aborted", generation, query);
            FetchOutcome::Cancelled
        },
        Ok(Err(err)) => {
            debug!("[{}] Search for {:?} failed: {}", generation, query, err);
            FetchOutcome::Failed
        },
        Ok(Ok(body)) => {
            let in_flight = lock(&in_flight);
            if in_flight.generation != generation {
                debug!("[{}] Dropping stale results for {:?}", generation, query);
                return FetchOutcome::Superseded;
            }

            results.set_inner_html(body);
            FetchOutcome::Rendered
        }
    }
}

fn lock(in_flight: &Mutex<InFlight>) -> MutexGuard<'_, InFlight> {
    in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
