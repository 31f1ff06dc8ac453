//! Place suggestion engine
//!
//! The coordinator debounces input, caches per-session results, keeps at
//! most one fetch in flight, and discards stale responses; the worker runs
//! the provider requests off the UI thread.

pub mod cache;
pub mod coordinator;
pub mod debouncer;
pub mod events;
pub mod provider;
pub mod ranking;
pub mod suggestion;
pub mod worker;

pub use coordinator::{SuggestCoordinator, SuggestOptions};
pub use events::{FetchRequest, FetchResponse, SuggestEvent};
pub use suggestion::{PlaceKind, Suggestion};
