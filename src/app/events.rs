//! Terminal event handling

use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::App;

/// How long to wait for a key before giving the coordinator another tick
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

impl App {
    /// Poll for terminal events and apply them.
    ///
    /// The short poll timeout keeps the debounce gate and response draining
    /// responsive while the user is idle.
    pub fn handle_events(&mut self) -> Result<()> {
        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(());
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
            Event::Resize(_, _) => self.mark_dirty(),
            _ => {}
        }

        Ok(())
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.quit(),
                KeyCode::Char('y') => self.copy_highlighted(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Enter => self.select_highlighted(),
            KeyCode::Down => {
                self.suggestions.select_next();
                self.mark_dirty();
            }
            KeyCode::Up => {
                self.suggestions.select_previous();
                self.mark_dirty();
            }
            _ => {
                // Everything else edits the single-line search input
                if self.input.input(Event::Key(key)) {
                    self.on_query_edited();
                }
            }
        }
    }
}
