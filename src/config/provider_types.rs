// Provider configuration type definitions

use clap::ValueEnum;
use serde::Deserialize;

/// Default geocoding endpoint (Base Adresse Nationale)
fn default_ban_endpoint() -> String {
    "https://api-adresse.data.gouv.fr/search/".to_string()
}

/// Default per-request timeout in milliseconds
fn default_timeout_ms() -> u64 {
    5000
}

/// Which suggestion source to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Address geocoding only (municipalities)
    #[default]
    Ban,
    /// Parish directory only
    Directory,
    /// Both sources, merged
    Combined,
}

/// Geocoding endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BanConfig {
    #[serde(default = "default_ban_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for BanConfig {
    fn default() -> Self {
        BanConfig {
            endpoint: default_ban_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Directory endpoint configuration
///
/// The endpoint is deployment-specific, so there is no default; the
/// directory and combined providers refuse to start without it.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        DirectoryConfig {
            endpoint: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Provider configuration section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,
    #[serde(default)]
    pub ban: BanConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
}
