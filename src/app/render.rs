//! TUI rendering
//!
//! One column: search input on top, suggestion list in the middle, status
//! line at the bottom. Each suggestion row shows the place name with its
//! kind badge and the geographic context pushed to the right edge, dimmed.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};

use crate::suggest::Suggestion;

use super::state::App;

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let [input_area, list_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_input(frame, input_area);
        self.render_suggestions(frame, list_area);
        self.render_status(frame, status_area);
    }

    fn render_input(&mut self, frame: &mut Frame, area: Rect) {
        self.input.set_block(Block::bordered().title(" Search a place "));
        self.input.set_cursor_line_style(Style::default());
        frame.render_widget(&self.input, area);
    }

    fn render_suggestions(&self, frame: &mut Frame, area: Rect) {
        // Two columns inside the border
        let inner_width = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .suggestions
            .suggestions()
            .iter()
            .map(|s| ListItem::new(suggestion_row(s, inner_width)))
            .collect();

        let list = List::new(items)
            .block(Block::bordered().title(" Suggestions "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = ListState::default();
        if !self.suggestions.is_empty() {
            state.select(Some(self.suggestions.selected_index()));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let mut text = match &self.status {
            Some(status) => status.clone(),
            None => "Enter: select   Ctrl+Y: copy   Esc: quit".to_string(),
        };
        if self.is_searching() {
            text.push_str("   searching…");
        }
        let line = Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::DIM),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn suggestion_row(suggestion: &Suggestion, width: usize) -> Line<'_> {
    let mut spans = vec![Span::raw(suggestion.name.as_str())];
    let mut used = suggestion.name.chars().count();

    if let Some(badge) = suggestion.kind.badge() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            badge,
            Style::default().fg(suggestion.kind.color()),
        ));
        used += 1 + badge.chars().count();
    }

    if let Some(context) = &suggestion.context {
        let context_len = context.chars().count();
        let padding = width.saturating_sub(used + context_len).max(2);
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(
            context.as_str(),
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        ));
    }

    Line::from(spans)
}
