//! Application state
//!
//! Owns the search input, the suggestion coordinator, and the displayed
//! list. The coordinator only ever learns about input through
//! `on_query_edited`; what to do with a chosen place stays here.

use std::sync::mpsc::{Receiver, Sender};

use tui_textarea::TextArea;

use crate::clipboard::{self, format_selection};
use crate::config::{ClipboardBackend, Config};
use crate::suggest::{
    FetchRequest, FetchResponse, SuggestCoordinator, SuggestEvent, Suggestion,
};

use super::suggestion_list::SuggestionList;

pub struct App {
    pub(super) input: TextArea<'static>,
    coordinator: SuggestCoordinator,
    pub(super) suggestions: SuggestionList,
    pub(super) status: Option<String>,
    clipboard_backend: ClipboardBackend,
    /// Place the user accepted with Enter, printed after terminal restore
    selection: Option<Suggestion>,
    should_quit: bool,
    dirty: bool,
}

impl App {
    pub fn new(config: &Config, initial_query: Option<String>) -> Self {
        let mut input = TextArea::default();
        if let Some(query) = &initial_query {
            input.insert_str(query);
        }

        let mut app = Self {
            input,
            coordinator: SuggestCoordinator::new((&config.suggest).into()),
            suggestions: SuggestionList::new(),
            status: None,
            clipboard_backend: config.clipboard.backend,
            selection: None,
            should_quit: false,
            dirty: true,
        };

        if initial_query.is_some() {
            app.on_query_edited();
        }
        app
    }

    /// Wire the coordinator to the fetch worker.
    pub fn set_channels(
        &mut self,
        request_tx: Sender<FetchRequest>,
        response_rx: Receiver<FetchResponse>,
    ) {
        self.coordinator.set_channels(request_tx, response_rx);
    }

    /// Current text of the search input.
    pub fn query(&self) -> String {
        self.input.lines().first().cloned().unwrap_or_default()
    }

    /// Advance the coordinator: fire a due debounce, drain worker responses.
    pub fn tick(&mut self) {
        if let Some(event) = self.coordinator.tick() {
            self.apply_suggest_event(event);
        }
        for event in self.coordinator.poll_responses() {
            self.apply_suggest_event(event);
        }
    }

    pub(super) fn on_query_edited(&mut self) {
        let query = self.query();
        if let Some(event) = self.coordinator.handle_input_change(&query) {
            self.apply_suggest_event(event);
        }
        self.mark_dirty();
    }

    fn apply_suggest_event(&mut self, event: SuggestEvent) {
        match event {
            SuggestEvent::Ready { query, suggestions } => {
                if suggestions.is_empty() {
                    self.status = Some(format!("No places found for \"{query}\""));
                } else {
                    self.status = None;
                }
                self.suggestions.update(suggestions);
            }
            SuggestEvent::Cleared => {
                self.suggestions.clear();
                self.status = None;
            }
            SuggestEvent::Error { query, message } => {
                log::warn!("fetch failed for {query:?}: {message}");
                self.status = Some(format!("Search failed: {message}"));
            }
        }
        self.mark_dirty();
    }

    /// Accept the highlighted suggestion and quit.
    pub(super) fn select_highlighted(&mut self) {
        if let Some(suggestion) = self.suggestions.selected() {
            self.selection = Some(suggestion.clone());
            self.coordinator.end_session();
            self.should_quit = true;
        }
    }

    /// Copy the highlighted suggestion to the clipboard.
    pub(super) fn copy_highlighted(&mut self) {
        let Some(suggestion) = self.suggestions.selected() else {
            return;
        };
        let summary = format_selection(suggestion);
        match clipboard::copy_to_clipboard(&summary, self.clipboard_backend) {
            Ok(()) => self.status = Some(format!("Copied: {summary}")),
            Err(e) => self.status = Some(format!("Clipboard error: {e:?}")),
        }
        self.mark_dirty();
    }

    pub(super) fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.mark_dirty();
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn selection(&self) -> Option<&Suggestion> {
        self.selection.as_ref()
    }

    pub fn is_searching(&self) -> bool {
        self.coordinator.has_in_flight()
    }

    pub fn should_render(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub(super) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
