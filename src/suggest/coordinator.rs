//! Suggestion fetch coordinator
//!
//! Sits between the search input and the suggestion provider. Records the
//! latest query, debounces fetch dispatch, serves repeated queries from the
//! session cache, keeps at most one request in flight, and drops responses
//! that no longer match the current input.
//!
//! The coordinator is single-threaded state driven by the caller's event
//! loop: feed it edits with `handle_input_change`, call `tick` every loop
//! iteration to fire the debounce gate, and drain worker messages with
//! `poll_responses`. Network I/O happens on the worker thread spawned in
//! `super::worker`; the two sides only meet through the request/response
//! channels injected with `set_channels`.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use tokio_util::sync::CancellationToken;

use super::cache::QueryCache;
use super::debouncer::Debouncer;
use super::events::{FetchRequest, FetchResponse, SuggestEvent};
use super::ranking;

/// Coordinator tuning knobs, filled from the `[suggest]` config section.
#[derive(Debug, Clone)]
pub struct SuggestOptions {
    /// Minimum query length (in characters, inclusive) that triggers a fetch
    pub min_length: usize,
    /// Quiet period before a fetch is dispatched
    pub debounce_ms: u64,
    /// Cap on the suggestion list after ranking
    pub max_results: usize,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            min_length: 3,
            debounce_ms: 400,
            max_results: 15,
        }
    }
}

/// The single request currently out on the wire, if any.
#[derive(Debug)]
struct InFlight {
    request_id: u64,
    query: String,
    cancel_token: CancellationToken,
}

pub struct SuggestCoordinator {
    options: SuggestOptions,
    /// Latest observed input, the reference for stale-response checks
    current_query: String,
    debouncer: Debouncer,
    cache: QueryCache,
    /// Monotonic request counter; responses carry it back
    request_id: u64,
    in_flight: Option<InFlight>,
    /// Query of the last dispatched or completed fetch. A debounce firing on
    /// the same query is a no-op; cleared input and selection reset it.
    last_fetch_query: Option<String>,
    request_tx: Option<Sender<FetchRequest>>,
    response_rx: Option<Receiver<FetchResponse>>,
}

impl SuggestCoordinator {
    pub fn new(options: SuggestOptions) -> Self {
        let debouncer = Debouncer::new(options.debounce_ms);
        Self {
            options,
            current_query: String::new(),
            debouncer,
            cache: QueryCache::new(),
            request_id: 0,
            in_flight: None,
            last_fetch_query: None,
            request_tx: None,
            response_rx: None,
        }
    }

    /// Inject the worker channels. Without them every dispatch fails with an
    /// error event; the coordinator itself stays usable.
    pub fn set_channels(
        &mut self,
        request_tx: Sender<FetchRequest>,
        response_rx: Receiver<FetchResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    #[allow(dead_code)] // Used in tests
    pub fn options(&self) -> &SuggestOptions {
        &self.options
    }

    #[allow(dead_code)] // Used in tests
    pub fn current_query(&self) -> &str {
        &self.current_query
    }

    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    #[allow(dead_code)] // Used in tests
    pub fn cached_query_count(&self) -> usize {
        self.cache.len()
    }

    /// Record the latest input text.
    ///
    /// Input shorter than `min_length` clears the displayed suggestions
    /// immediately and cancels any pending or in-flight fetch; it never
    /// reaches the cache. Anything else (re)starts the debounce timer.
    pub fn handle_input_change(&mut self, query: &str) -> Option<SuggestEvent> {
        self.current_query = query.to_string();

        if query.chars().count() < self.options.min_length {
            self.debouncer.cancel();
            self.cancel_in_flight();
            self.last_fetch_query = None;
            return Some(SuggestEvent::Cleared);
        }

        let superseded = self.in_flight.as_ref().is_some_and(|f| f.query != query);
        if superseded {
            self.cancel_in_flight();
        }

        self.debouncer.schedule();
        None
    }

    /// Fire the debounce gate if its quiet period has elapsed.
    ///
    /// A cached query is answered synchronously with no network call. An
    /// uncached one is dispatched to the worker, superseding any request
    /// still in flight.
    pub fn tick(&mut self) -> Option<SuggestEvent> {
        if !self.debouncer.is_ready() {
            return None;
        }
        self.debouncer.mark_dispatched();

        let query = self.current_query.clone();
        if query.chars().count() < self.options.min_length {
            return None;
        }

        if self.last_fetch_query.as_deref() == Some(query.as_str()) {
            return None;
        }

        if let Some(cached) = self.cache.get(&query) {
            log::debug!("cache hit for {query:?}");
            self.last_fetch_query = Some(query.clone());
            return Some(SuggestEvent::Ready {
                suggestions: cached.to_vec(),
                query,
            });
        }

        self.dispatch_fetch(query)
    }

    /// Drain worker responses, dropping anything stale.
    ///
    /// A response is applied only when both its request id matches the
    /// in-flight request and its query still equals the current input.
    pub fn poll_responses(&mut self) -> Vec<SuggestEvent> {
        let mut events = Vec::new();

        loop {
            let response = match &self.response_rx {
                Some(rx) => match rx.try_recv() {
                    Ok(response) => response,
                    Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                },
                None => break,
            };

            if let Some(event) = self.apply_response(response) {
                events.push(event);
            }
        }

        events
    }

    /// End the search session after the caller accepted a suggestion.
    ///
    /// Clears the pending timer, cancels any in-flight fetch, and resets the
    /// idempotence tag. What happens with the chosen suggestion (form fill,
    /// submission) is the caller's business.
    pub fn end_session(&mut self) {
        self.debouncer.cancel();
        self.cancel_in_flight();
        self.last_fetch_query = None;
    }

    fn dispatch_fetch(&mut self, query: String) -> Option<SuggestEvent> {
        self.cancel_in_flight();

        self.request_id = self.request_id.wrapping_add(1);
        let cancel_token = CancellationToken::new();

        let sent = match &self.request_tx {
            Some(tx) => tx
                .send(FetchRequest {
                    query: query.clone(),
                    request_id: self.request_id,
                    cancel_token: cancel_token.clone(),
                })
                .is_ok(),
            None => false,
        };

        if !sent {
            log::error!("fetch worker unavailable, dropping request for {query:?}");
            return Some(SuggestEvent::Error {
                query,
                message: "suggestion service unavailable".to_string(),
            });
        }

        log::debug!("dispatched fetch {} for {query:?}", self.request_id);
        self.in_flight = Some(InFlight {
            request_id: self.request_id,
            query: query.clone(),
            cancel_token,
        });
        self.last_fetch_query = Some(query);
        None
    }

    fn apply_response(&mut self, response: FetchResponse) -> Option<SuggestEvent> {
        match response {
            FetchResponse::Results {
                query,
                request_id,
                suggestions,
            } => {
                if !self.is_current(request_id, &query) {
                    log::debug!("dropping stale results for {query:?} (request {request_id})");
                    return None;
                }
                self.in_flight = None;

                let ranked = ranking::rank(&query, suggestions, self.options.max_results);
                self.cache.insert(query.clone(), ranked.clone());
                Some(SuggestEvent::Ready {
                    query,
                    suggestions: ranked,
                })
            }
            FetchResponse::Failed {
                query,
                request_id,
                message,
            } => {
                let matches_in_flight = self
                    .in_flight
                    .as_ref()
                    .is_some_and(|f| f.request_id == request_id);
                if matches_in_flight {
                    self.in_flight = None;
                }
                // Failed fetches never reach the cache, and releasing the tag
                // lets the same query retry on a later input change
                if self.last_fetch_query.as_deref() == Some(query.as_str()) {
                    self.last_fetch_query = None;
                }

                if !matches_in_flight || query != self.current_query {
                    log::debug!("dropping stale failure for {query:?} (request {request_id})");
                    return None;
                }
                Some(SuggestEvent::Error { query, message })
            }
            FetchResponse::Cancelled { request_id } => {
                log::debug!("fetch {request_id} cancelled");
                if self
                    .in_flight
                    .as_ref()
                    .is_some_and(|f| f.request_id == request_id)
                {
                    self.in_flight = None;
                }
                None
            }
        }
    }

    fn is_current(&self, request_id: u64, query: &str) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|f| f.request_id == request_id)
            && query == self.current_query
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            log::debug!(
                "cancelling fetch {} for {:?}",
                in_flight.request_id,
                in_flight.query
            );
            in_flight.cancel_token.cancel();
        }
    }
}

impl Default for SuggestCoordinator {
    fn default() -> Self {
        Self::new(SuggestOptions::default())
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod coordinator_tests;
