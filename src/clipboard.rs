//! Clipboard module for parvis
//!
//! Copies the selected place with support for:
//! - System clipboard (via arboard)
//! - OSC 52 escape sequences (for remote terminals)
//! - Auto mode (system with OSC 52 fallback)

mod backend;
mod osc52;
mod selection;
mod system;

pub use backend::{ClipboardError, ClipboardResult, copy_to_clipboard};
pub use selection::format_selection;
