mod events;
mod render;
mod state;
mod suggestion_list;

// Re-export public types
pub use state::App;
pub use suggestion_list::SuggestionList;
