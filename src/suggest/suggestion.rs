//! Normalized place suggestion records
//!
//! Every provider payload is normalized into `Suggestion` before it reaches
//! the coordinator, the cache, or the UI. Records are immutable once built.

use ratatui::style::Color;
use serde::Serialize;

/// Classification of a suggested place
///
/// Provider `type` strings are mapped through `from_provider_tag`; anything
/// unrecognized becomes `Unknown` rather than failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
    /// A town or city from the geocoding provider
    Municipality,
    /// A parish from the directory provider
    Parish,
    /// A single church from the directory provider
    Church,
    Unknown,
}

impl PlaceKind {
    /// Parse a provider `type` string, mapping unrecognized values to Unknown
    pub fn from_provider_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "municipality" => PlaceKind::Municipality,
            "parish" => PlaceKind::Parish,
            "church" => PlaceKind::Church,
            _ => PlaceKind::Unknown,
        }
    }

    /// Badge text shown next to the suggestion name
    ///
    /// Unknown places carry no badge, matching the directory listing.
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            PlaceKind::Municipality => Some("Ville"),
            PlaceKind::Parish => Some("Paroisse"),
            PlaceKind::Church => Some("Église"),
            PlaceKind::Unknown => None,
        }
    }

    /// Badge color for this kind
    pub fn color(&self) -> Color {
        match self {
            PlaceKind::Municipality => Color::Blue,
            PlaceKind::Parish => Color::Green,
            PlaceKind::Church => Color::Cyan,
            PlaceKind::Unknown => Color::DarkGray,
        }
    }
}

/// A single normalized autocomplete suggestion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// Display name of the place
    pub name: String,
    /// Geographic context line (e.g. "69, Rhône, Auvergne-Rhône-Alpes")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub kind: PlaceKind,
    /// Opaque provider identifier, when the directory supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Suggestion {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, kind: PlaceKind) -> Self {
        Self {
            name: name.into(),
            context: None,
            latitude,
            longitude,
            kind,
            id: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
