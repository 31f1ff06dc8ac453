// Configuration type definitions

use serde::Deserialize;

use crate::suggest::SuggestOptions;

use super::provider_types::ProviderConfig;

/// Clipboard backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    #[default]
    Auto,
    System,
    Osc52,
}

/// Clipboard configuration section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ClipboardConfig {
    #[serde(default)]
    pub backend: ClipboardBackend,
}

fn default_min_length() -> usize {
    3
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_max_results() -> usize {
    15
}

/// Suggestion coordinator tuning section
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestConfig {
    /// Minimum query length (characters, inclusive) before fetching
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Quiet period before a fetch is dispatched
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Cap on the displayed suggestion list
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        SuggestConfig {
            min_length: default_min_length(),
            debounce_ms: default_debounce_ms(),
            max_results: default_max_results(),
        }
    }
}

impl From<&SuggestConfig> for SuggestOptions {
    fn from(config: &SuggestConfig) -> Self {
        SuggestOptions {
            min_length: config.min_length,
            debounce_ms: config.debounce_ms,
            max_results: config.max_results,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub suggest: SuggestConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
}
