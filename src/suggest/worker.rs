//! Fetch worker thread
//!
//! Runs provider requests in a background thread so the UI loop never blocks
//! on the network. Receives requests via channel, fetches and normalizes
//! suggestions, and sends tagged responses back to the coordinator.
//!
//! Uses a tokio runtime for async HTTP with cancellation support. Includes
//! panic handling to prevent TUI corruption from provider panics.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, Sender};

use super::events::{FetchRequest, FetchResponse};
use super::provider::{ProviderError, SuggestProvider};
use crate::config::provider_types::ProviderConfig;

/// Spawn the fetch worker thread
///
/// Creates a background thread with a tokio runtime that listens for
/// requests, runs them against the configured provider with cancellation
/// support, and reports results on the response channel. The provider is
/// built here from config and moved into the thread; nothing is discovered
/// at runtime.
///
/// `limit` is the result cap forwarded to the provider endpoints. A provider
/// that fails to configure is reported per-request as a failed fetch,
/// leaving the rest of the application usable.
pub fn spawn_worker(
    config: &ProviderConfig,
    limit: usize,
    request_rx: Receiver<FetchRequest>,
    response_tx: Sender<FetchResponse>,
) {
    let provider_result = SuggestProvider::from_config(config);

    std::thread::spawn(move || {
        // The default panic hook prints to stderr which corrupts the TUI
        let prev_hook = panic::take_hook();
        panic::set_hook(Box::new(|panic_info| {
            log::error!("fetch worker panic: {panic_info}");
        }));

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to create tokio runtime");

            rt.block_on(worker_loop(provider_result, limit, request_rx, response_tx));
        }));

        panic::set_hook(prev_hook);

        if result.is_err() {
            log::error!("fetch worker thread stopped after panic");
        }
    });
}

/// Process requests until the channel is closed.
///
/// Blocking `recv()` is fine here since we're in a dedicated thread.
async fn worker_loop(
    provider_result: Result<SuggestProvider, ProviderError>,
    limit: usize,
    request_rx: Receiver<FetchRequest>,
    response_tx: Sender<FetchResponse>,
) {
    let provider = match provider_result {
        Ok(p) => {
            log::debug!("fetch worker ready with {} provider", p.provider_name());
            Some(p)
        }
        Err(e) => {
            log::warn!("fetch worker started without provider: {e}");
            None
        }
    };

    while let Ok(request) = request_rx.recv() {
        handle_fetch(&provider, limit, request, &response_tx).await;
    }
}

async fn handle_fetch(
    provider: &Option<SuggestProvider>,
    limit: usize,
    request: FetchRequest,
    response_tx: &Sender<FetchResponse>,
) {
    let FetchRequest {
        query,
        request_id,
        cancel_token,
    } = request;

    if cancel_token.is_cancelled() {
        let _ = response_tx.send(FetchResponse::Cancelled { request_id });
        return;
    }

    let provider = match provider {
        Some(p) => p,
        None => {
            let _ = response_tx.send(FetchResponse::Failed {
                query,
                request_id,
                message: "suggestion provider not configured; check the [provider] section of your config".to_string(),
            });
            return;
        }
    };

    match provider.fetch_with_cancel(&query, limit, &cancel_token).await {
        Ok(suggestions) => {
            let _ = response_tx.send(FetchResponse::Results {
                query,
                request_id,
                suggestions,
            });
        }
        Err(ProviderError::Cancelled) => {
            let _ = response_tx.send(FetchResponse::Cancelled { request_id });
        }
        Err(e) => {
            let _ = response_tx.send(FetchResponse::Failed {
                query,
                request_id,
                message: e.to_string(),
            });
        }
    }
}
