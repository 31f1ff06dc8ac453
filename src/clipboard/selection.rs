//! Selected-place formatting for the clipboard

use crate::suggest::Suggestion;

/// One-line summary of a selected place: name, context, coordinates.
pub fn format_selection(suggestion: &Suggestion) -> String {
    let mut line = suggestion.name.clone();
    if let Some(context) = &suggestion.context {
        line.push_str(" · ");
        line.push_str(context);
    }
    line.push_str(&format!(
        " ({:.5}, {:.5})",
        suggestion.latitude, suggestion.longitude
    ));
    line
}
