use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use proptest::prelude::*;

use super::*;
use crate::suggest::suggestion::{PlaceKind, Suggestion};

const TEST_DEBOUNCE_MS: u64 = 25;

fn test_options() -> SuggestOptions {
    SuggestOptions {
        min_length: 3,
        debounce_ms: TEST_DEBOUNCE_MS,
        max_results: 15,
    }
}

/// Coordinator wired to channels the test drives by hand, playing the worker.
fn wired_coordinator() -> (
    SuggestCoordinator,
    Receiver<FetchRequest>,
    Sender<FetchResponse>,
) {
    let mut coordinator = SuggestCoordinator::new(test_options());
    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    coordinator.set_channels(request_tx, response_rx);
    (coordinator, request_rx, response_tx)
}

fn wait_past_debounce() {
    thread::sleep(Duration::from_millis(TEST_DEBOUNCE_MS + 15));
}

fn place(name: &str) -> Suggestion {
    Suggestion::new(name, 45.75, 4.85, PlaceKind::Municipality)
}

fn results_for(request: &FetchRequest, names: &[&str]) -> FetchResponse {
    FetchResponse::Results {
        query: request.query.clone(),
        request_id: request.request_id,
        suggestions: names.iter().map(|n| place(n)).collect(),
    }
}

#[test]
fn test_short_query_clears_and_never_fetches() {
    let (mut coordinator, request_rx, _response_tx) = wired_coordinator();

    let event = coordinator.handle_input_change("Ly");
    assert_eq!(event, Some(SuggestEvent::Cleared));

    wait_past_debounce();
    assert_eq!(coordinator.tick(), None);
    assert!(request_rx.try_recv().is_err());
    assert_eq!(coordinator.cached_query_count(), 0);
}

#[test]
fn test_min_length_boundary_is_inclusive() {
    let (mut coordinator, request_rx, _response_tx) = wired_coordinator();

    assert_eq!(coordinator.handle_input_change("Lyo"), None);
    wait_past_debounce();
    assert_eq!(coordinator.tick(), None);

    let request = request_rx.try_recv().expect("three chars must dispatch");
    assert_eq!(request.query, "Lyo");
}

#[test]
fn test_no_fetch_before_debounce_elapses() {
    let (mut coordinator, request_rx, _response_tx) = wired_coordinator();

    coordinator.handle_input_change("Lyon");
    assert_eq!(coordinator.tick(), None);
    assert!(request_rx.try_recv().is_err());
}

#[test]
fn test_rapid_inputs_collapse_to_one_fetch() {
    let (mut coordinator, request_rx, _response_tx) = wired_coordinator();

    coordinator.handle_input_change("Pari");
    coordinator.handle_input_change("Paris");
    wait_past_debounce();
    coordinator.tick();

    let request = request_rx.try_recv().expect("one fetch expected");
    assert_eq!(request.query, "Paris");
    assert!(request_rx.try_recv().is_err(), "only one fetch expected");
}

#[test]
fn test_results_are_ranked_cached_and_emitted() {
    let (mut coordinator, request_rx, response_tx) = wired_coordinator();

    coordinator.handle_input_change("Lyon");
    wait_past_debounce();
    coordinator.tick();
    let request = request_rx.try_recv().unwrap();

    response_tx
        .send(results_for(&request, &["Lyons-la-Forêt", "Lyon"]))
        .unwrap();

    let events = coordinator.poll_responses();
    assert_eq!(events.len(), 1);
    match &events[0] {
        SuggestEvent::Ready { query, suggestions } => {
            assert_eq!(query, "Lyon");
            assert_eq!(suggestions.len(), 2);
            assert_eq!(suggestions[0].name, "Lyon");
        }
        other => panic!("expected Ready, got {other:?}"),
    }
    assert_eq!(coordinator.cached_query_count(), 1);
    assert!(!coordinator.has_in_flight());
}

#[test]
fn test_cached_query_answers_without_network() {
    let (mut coordinator, request_rx, response_tx) = wired_coordinator();

    // First round-trip populates the cache
    coordinator.handle_input_change("Lyon");
    wait_past_debounce();
    coordinator.tick();
    let request = request_rx.try_recv().unwrap();
    response_tx
        .send(results_for(&request, &["Lyon", "Lyons-la-Forêt"]))
        .unwrap();
    coordinator.poll_responses();

    // Move away, then settle on the cached query again
    coordinator.handle_input_change("Nice");
    wait_past_debounce();
    coordinator.tick();
    let request = request_rx.try_recv().unwrap();
    response_tx.send(results_for(&request, &["Nice"])).unwrap();
    coordinator.poll_responses();

    coordinator.handle_input_change("Lyon");
    wait_past_debounce();
    let event = coordinator.tick();

    match event {
        Some(SuggestEvent::Ready { query, suggestions }) => {
            assert_eq!(query, "Lyon");
            assert_eq!(suggestions.len(), 2);
        }
        other => panic!("expected cached Ready, got {other:?}"),
    }
    assert!(
        request_rx.try_recv().is_err(),
        "cached query must not re-fetch"
    );
}

#[test]
fn test_superseded_response_is_dropped() {
    let (mut coordinator, request_rx, response_tx) = wired_coordinator();

    coordinator.handle_input_change("Pari");
    wait_past_debounce();
    coordinator.tick();
    let first = request_rx.try_recv().unwrap();

    // Typing on cancels the in-flight request before the next dispatch
    coordinator.handle_input_change("Paris");
    assert!(first.cancel_token.is_cancelled());
    wait_past_debounce();
    coordinator.tick();
    let second = request_rx.try_recv().unwrap();

    // The superseded response arrives late and must vanish silently
    response_tx.send(results_for(&first, &["Pari"])).unwrap();
    assert!(coordinator.poll_responses().is_empty());

    response_tx.send(results_for(&second, &["Paris"])).unwrap();
    let events = coordinator.poll_responses();
    assert_eq!(events.len(), 1);
    match &events[0] {
        SuggestEvent::Ready { query, .. } => assert_eq!(query, "Paris"),
        other => panic!("expected Ready for Paris, got {other:?}"),
    }
}

#[test]
fn test_clearing_input_cancels_in_flight_and_drops_late_response() {
    let (mut coordinator, request_rx, response_tx) = wired_coordinator();

    coordinator.handle_input_change("Marseille");
    wait_past_debounce();
    coordinator.tick();
    let request = request_rx.try_recv().unwrap();

    // Clearing must answer synchronously with an empty display
    let event = coordinator.handle_input_change("");
    assert_eq!(event, Some(SuggestEvent::Cleared));
    assert!(request.cancel_token.is_cancelled());
    assert!(!coordinator.has_in_flight());

    // The late response is discarded and never cached
    response_tx
        .send(results_for(&request, &["Marseille"]))
        .unwrap();
    assert!(coordinator.poll_responses().is_empty());
    assert_eq!(coordinator.cached_query_count(), 0);
}

#[test]
fn test_failure_surfaces_error_and_stays_retryable() {
    let (mut coordinator, request_rx, response_tx) = wired_coordinator();

    coordinator.handle_input_change("Lyon");
    wait_past_debounce();
    coordinator.tick();
    let request = request_rx.try_recv().unwrap();

    response_tx
        .send(FetchResponse::Failed {
            query: request.query.clone(),
            request_id: request.request_id,
            message: "connection refused".to_string(),
        })
        .unwrap();

    let events = coordinator.poll_responses();
    assert_eq!(
        events,
        vec![SuggestEvent::Error {
            query: "Lyon".to_string(),
            message: "connection refused".to_string(),
        }]
    );
    assert_eq!(coordinator.cached_query_count(), 0);

    // The same query can fetch again after the failure
    coordinator.handle_input_change("Lyon");
    wait_past_debounce();
    coordinator.tick();
    assert!(request_rx.try_recv().is_ok(), "failed query must retry");
}

#[test]
fn test_settling_on_same_query_is_idempotent() {
    let (mut coordinator, request_rx, response_tx) = wired_coordinator();

    coordinator.handle_input_change("Lyon");
    wait_past_debounce();
    coordinator.tick();
    let request = request_rx.try_recv().unwrap();
    response_tx.send(results_for(&request, &["Lyon"])).unwrap();
    coordinator.poll_responses();

    // A change event with identical text neither re-fetches nor re-emits
    coordinator.handle_input_change("Lyon");
    wait_past_debounce();
    assert_eq!(coordinator.tick(), None);
    assert!(request_rx.try_recv().is_err());
}

#[test]
fn test_dispatch_without_worker_reports_error() {
    let mut coordinator = SuggestCoordinator::new(test_options());

    coordinator.handle_input_change("Lyon");
    wait_past_debounce();
    let event = coordinator.tick();

    assert!(matches!(event, Some(SuggestEvent::Error { query, .. }) if query == "Lyon"));
}

#[test]
fn test_end_session_drops_pending_fetch() {
    let (mut coordinator, request_rx, _response_tx) = wired_coordinator();

    coordinator.handle_input_change("Lyon");
    coordinator.end_session();
    wait_past_debounce();
    assert_eq!(coordinator.tick(), None);
    assert!(request_rx.try_recv().is_err());
}

#[test]
fn test_end_session_cancels_in_flight() {
    let (mut coordinator, request_rx, _response_tx) = wired_coordinator();

    coordinator.handle_input_change("Lyon");
    wait_past_debounce();
    coordinator.tick();
    let request = request_rx.try_recv().unwrap();

    coordinator.end_session();
    assert!(request.cancel_token.is_cancelled());
    assert!(!coordinator.has_in_flight());
}

// *For any* input below the minimum length, the coordinator clears the
// display and never dispatches, no matter how long the caller waits.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn prop_short_queries_never_dispatch(query in "[a-zA-Z]{0,2}") {
        let (mut coordinator, request_rx, _response_tx) = wired_coordinator();

        let event = coordinator.handle_input_change(&query);
        prop_assert_eq!(event, Some(SuggestEvent::Cleared));

        wait_past_debounce();
        prop_assert_eq!(coordinator.tick(), None);
        prop_assert!(request_rx.try_recv().is_err());
    }
}

// *For any* pair of distinct queries typed in quick succession, at most one
// fetch is dispatched and it carries the later query.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn prop_latest_query_wins(
        first in "[a-z]{3,8}",
        suffix in "[a-z]{1,4}",
    ) {
        let second = format!("{first}{suffix}");
        let (mut coordinator, request_rx, _response_tx) = wired_coordinator();

        coordinator.handle_input_change(&first);
        coordinator.handle_input_change(&second);
        wait_past_debounce();
        coordinator.tick();

        let request = request_rx.try_recv().expect("one fetch expected");
        prop_assert_eq!(request.query, second);
        prop_assert!(request_rx.try_recv().is_err());
    }
}
