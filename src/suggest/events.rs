//! Coordinator message types
//!
//! `FetchRequest`/`FetchResponse` cross the channel between the coordinator
//! (UI thread) and the fetch worker. Both directions are tagged with the
//! request id and the originating query so the coordinator can drop stale
//! responses with an explicit comparison against its current state.
//! `SuggestEvent` is what the coordinator hands back to its caller.

use tokio_util::sync::CancellationToken;

use super::suggestion::Suggestion;

/// Request sent to the fetch worker thread
#[derive(Debug)]
pub struct FetchRequest {
    /// The query the fetch is issued for
    pub query: String,
    /// Unique id for this request, used to filter stale responses
    pub request_id: u64,
    /// Token the coordinator cancels when the request is superseded
    pub cancel_token: CancellationToken,
}

/// Response received from the fetch worker thread
#[derive(Debug)]
pub enum FetchResponse {
    /// Normalized provider results for a query
    Results {
        query: String,
        request_id: u64,
        suggestions: Vec<Suggestion>,
    },
    /// The fetch failed; the query stays uncached and retryable
    Failed {
        query: String,
        request_id: u64,
        message: String,
    },
    /// The request was cancelled before completing
    Cancelled { request_id: u64 },
}

/// Events the coordinator emits to its caller
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestEvent {
    /// An ordered suggestion list is ready for display
    Ready {
        query: String,
        suggestions: Vec<Suggestion>,
    },
    /// Displayed suggestions must be cleared (input emptied or below minimum)
    Cleared,
    /// A fetch failed; not fatal, the next keystroke may retry
    Error { query: String, message: String },
}
