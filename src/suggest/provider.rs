//! Suggestion provider abstraction
//!
//! Defines the `SuggestProvider` enum, `ProviderError` types, and the factory
//! for building provider instances from configuration. Each known response
//! shape gets its own typed adapter; the active shape is a configuration
//! choice, never sniffed at runtime.

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::config::provider_types::{ProviderConfig, ProviderKind};

use super::suggestion::Suggestion;

mod ban;
mod directory;

pub use ban::BanClient;
pub use directory::DirectoryClient;

/// Errors that can occur while fetching suggestions
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// Provider is missing required configuration
    #[error("[{provider}] not configured: {message}")]
    NotConfigured { provider: String, message: String },

    /// Network error during the request (includes timeouts)
    #[error("[{provider}] network error: {message}")]
    Network { provider: String, message: String },

    /// Endpoint returned a non-success status
    #[error("[{provider}] API error ({code}): {message}")]
    Api {
        provider: String,
        code: u16,
        message: String,
    },

    /// Response body did not match the provider's shape
    #[error("[{provider}] parse error: {message}")]
    Parse { provider: String, message: String },

    /// Request was cancelled
    #[error("request cancelled")]
    Cancelled,
}

/// Async suggestion provider with cancellation support
#[derive(Debug, Clone)]
pub enum SuggestProvider {
    /// Address geocoding endpoint returning a GeoJSON-like feature collection
    Ban(BanClient),
    /// Directory endpoint returning a flat list of pre-normalized records
    Directory(DirectoryClient),
    /// Both sources queried concurrently and merged
    Combined {
        ban: BanClient,
        directory: DirectoryClient,
    },
}

impl SuggestProvider {
    /// Returns the display name of the provider
    pub fn provider_name(&self) -> &'static str {
        match self {
            SuggestProvider::Ban(_) => "ban",
            SuggestProvider::Directory(_) => "directory",
            SuggestProvider::Combined { .. } => "combined",
        }
    }

    /// Build a provider from configuration
    ///
    /// Returns an error when the selected provider misses required settings
    /// (the directory shapes need an endpoint; the geocoding endpoint has a
    /// public default).
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        match config.kind {
            ProviderKind::Ban => Ok(SuggestProvider::Ban(BanClient::new(
                config.ban.endpoint.clone(),
                config.ban.timeout_ms,
            ))),
            ProviderKind::Directory => Ok(SuggestProvider::Directory(directory_from_config(
                config, "directory",
            )?)),
            ProviderKind::Combined => {
                let ban = BanClient::new(config.ban.endpoint.clone(), config.ban.timeout_ms);
                let directory = directory_from_config(config, "combined")?;
                Ok(SuggestProvider::Combined { ban, directory })
            }
        }
    }

    /// Fetch suggestions for a query, racing the request against the token.
    ///
    /// The combined provider degrades to a single source when the other one
    /// fails, mirroring the directory's aggregation service; it only errors
    /// when both sources fail.
    pub async fn fetch_with_cancel(
        &self,
        query: &str,
        limit: usize,
        cancel_token: &CancellationToken,
    ) -> Result<Vec<Suggestion>, ProviderError> {
        match self {
            SuggestProvider::Ban(client) => client.fetch_with_cancel(query, limit, cancel_token).await,
            SuggestProvider::Directory(client) => {
                client.fetch_with_cancel(query, limit, cancel_token).await
            }
            SuggestProvider::Combined { ban, directory } => {
                let (ban_result, directory_result) = tokio::join!(
                    ban.fetch_with_cancel(query, limit, cancel_token),
                    directory.fetch_with_cancel(query, limit, cancel_token),
                );
                merge_combined(ban_result, directory_result)
            }
        }
    }
}

fn directory_from_config(
    config: &ProviderConfig,
    provider: &str,
) -> Result<DirectoryClient, ProviderError> {
    let endpoint = config
        .directory
        .endpoint
        .as_ref()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ProviderError::NotConfigured {
            provider: provider.to_string(),
            message: "missing endpoint. Add 'endpoint' in the [provider.directory] section."
                .to_string(),
        })?;

    Ok(DirectoryClient::new(
        endpoint.clone(),
        config.directory.timeout_ms,
    ))
}

fn merge_combined(
    ban_result: Result<Vec<Suggestion>, ProviderError>,
    directory_result: Result<Vec<Suggestion>, ProviderError>,
) -> Result<Vec<Suggestion>, ProviderError> {
    if matches!(ban_result, Err(ProviderError::Cancelled))
        || matches!(directory_result, Err(ProviderError::Cancelled))
    {
        return Err(ProviderError::Cancelled);
    }

    match (ban_result, directory_result) {
        (Ok(mut suggestions), Ok(more)) => {
            suggestions.extend(more);
            Ok(suggestions)
        }
        (Ok(suggestions), Err(e)) | (Err(e), Ok(suggestions)) => {
            log::warn!("combined fetch degraded to one source: {e}");
            Ok(suggestions)
        }
        (Err(e), Err(other)) => {
            log::warn!("combined fetch failed on both sources: {e}; {other}");
            Err(e)
        }
    }
}
