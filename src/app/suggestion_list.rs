//! Displayed suggestion list with a wrapping selection cursor

use crate::suggest::Suggestion;

#[derive(Debug, Default)]
pub struct SuggestionList {
    suggestions: Vec<Suggestion>,
    selected_index: usize,
}

impl SuggestionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed suggestions, resetting the cursor to the top.
    pub fn update(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        self.selected_index = 0;
    }

    pub fn clear(&mut self) {
        self.suggestions.clear();
        self.selected_index = 0;
    }

    pub fn select_next(&mut self) {
        if !self.suggestions.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.suggestions.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.suggestions.is_empty() {
            if self.selected_index == 0 {
                self.selected_index = self.suggestions.len() - 1;
            } else {
                self.selected_index -= 1;
            }
        }
    }

    pub fn selected(&self) -> Option<&Suggestion> {
        self.suggestions.get(self.selected_index)
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }
}
