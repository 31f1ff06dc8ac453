//! Debounce gate for fetch dispatch
//!
//! Delays network requests until user input stabilizes. Each new keystroke
//! resets the timer, so rapid typing collapses into a single fetch once the
//! configured quiet period has elapsed.

use std::time::{Duration, Instant};

/// Manages debounced fetch timing.
///
/// Tracks when the last input occurred and whether a fetch is waiting for the
/// quiet period to expire. The owner polls `is_ready()` from its event loop
/// and dispatches when it turns true.
#[derive(Debug)]
pub struct Debouncer {
    /// Quiet period in milliseconds
    delay_ms: u64,
    /// Timestamp of the last input that triggered a debounce
    last_input_time: Option<Instant>,
    /// Whether a fetch is waiting for the debounce to expire
    pending: bool,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            last_input_time: None,
            pending: false,
        }
    }

    /// Schedule a fetch after the quiet period.
    ///
    /// Calling this again before the period elapses restarts the timer.
    pub fn schedule(&mut self) {
        self.last_input_time = Some(Instant::now());
        self.pending = true;
    }

    /// Cancel any pending fetch and reset the timer.
    pub fn cancel(&mut self) {
        self.pending = false;
        self.last_input_time = None;
    }

    /// Whether the quiet period has elapsed for a pending fetch.
    pub fn is_ready(&self) -> bool {
        if !self.pending {
            return false;
        }

        match self.last_input_time {
            Some(last_time) => last_time.elapsed() >= Duration::from_millis(self.delay_ms),
            None => false,
        }
    }

    /// Mark the pending fetch as dispatched.
    pub fn mark_dispatched(&mut self) {
        self.pending = false;
        self.last_input_time = None;
    }

    #[allow(dead_code)] // Used in tests
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    #[allow(dead_code)] // Used in tests
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(400)
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
