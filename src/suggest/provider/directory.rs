//! Parish directory client
//!
//! Queries the directory's autocomplete endpoint, which returns a flat JSON
//! array of pre-normalized place records (parishes, churches, and anything
//! else the directory indexes). Records without coordinates are skipped: a
//! suggestion is only useful here if it can position the map.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use super::ProviderError;
use crate::suggest::suggestion::{PlaceKind, Suggestion};

const PROVIDER: &str = "directory";

#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl DirectoryClient {
    pub fn new(endpoint: String, timeout_ms: u64) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Fetch directory suggestions, racing the request against the token.
    pub async fn fetch_with_cancel(
        &self,
        query: &str,
        limit: usize,
        cancel_token: &CancellationToken,
    ) -> Result<Vec<Suggestion>, ProviderError> {
        if cancel_token.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        tokio::select! {
            biased;

            _ = cancel_token.cancelled() => Err(ProviderError::Cancelled),
            result = self.fetch(query, limit) => result,
        }
    }

    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>, ProviderError> {
        let limit_param = limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query), ("limit", limit_param.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ProviderError::Api {
                provider: PROVIDER.to_string(),
                code,
                message,
            });
        }

        let records: Vec<DirectoryRecord> =
            response.json().await.map_err(|e| ProviderError::Parse {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })?;

        Ok(normalize(records))
    }
}

/// Flat record shape of the directory endpoint
#[derive(Debug, Deserialize)]
struct DirectoryRecord {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    name: String,
    #[serde(default)]
    context: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    uuid: Option<String>,
}

fn normalize(records: Vec<DirectoryRecord>) -> Vec<Suggestion> {
    records
        .into_iter()
        .filter_map(|record| {
            let (Some(latitude), Some(longitude)) = (record.latitude, record.longitude) else {
                log::debug!("skipping record {:?} without coordinates", record.name);
                return None;
            };
            let kind = record
                .kind
                .as_deref()
                .map(PlaceKind::from_provider_tag)
                .unwrap_or(PlaceKind::Unknown);
            let mut suggestion = Suggestion::new(record.name, latitude, longitude, kind);
            if let Some(context) = record.context {
                suggestion = suggestion.with_context(context);
            }
            if let Some(uuid) = record.uuid {
                suggestion = suggestion.with_id(uuid);
            }
            Some(suggestion)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<DirectoryRecord> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_normalize_flat_records() {
        let records = parse(
            r#"[
                {
                    "type": "church",
                    "name": "Église Saint-Jean",
                    "context": "69005 Lyon",
                    "latitude": 45.7608,
                    "longitude": 4.8274,
                    "uuid": "0f9a2b"
                },
                {
                    "type": "municipality",
                    "name": "Lyon",
                    "context": "69, Rhône",
                    "latitude": 45.75,
                    "longitude": 4.85
                }
            ]"#,
        );

        let suggestions = normalize(records);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].name, "Église Saint-Jean");
        assert_eq!(suggestions[0].kind, PlaceKind::Church);
        assert_eq!(suggestions[0].id.as_deref(), Some("0f9a2b"));
        assert_eq!(suggestions[1].kind, PlaceKind::Municipality);
    }

    #[test]
    fn test_normalize_skips_records_without_coordinates() {
        let records = parse(
            r#"[
                {"type": "parish", "name": "Paroisse Sainte-Blandine", "context": "69002 Lyon"},
                {"type": "church", "name": "Saint-Georges", "latitude": 45.757, "longitude": 4.827}
            ]"#,
        );

        let suggestions = normalize(records);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "Saint-Georges");
    }

    #[test]
    fn test_unrecognized_type_maps_to_unknown() {
        let records = parse(
            r#"[{"type": "website", "name": "Somewhere", "latitude": 1.0, "longitude": 2.0}]"#,
        );
        assert_eq!(normalize(records)[0].kind, PlaceKind::Unknown);
    }

    #[test]
    fn test_missing_type_maps_to_unknown() {
        let records = parse(r#"[{"name": "Somewhere", "latitude": 1.0, "longitude": 2.0}]"#);
        assert_eq!(normalize(records)[0].kind, PlaceKind::Unknown);
    }

    #[test]
    fn test_empty_array() {
        assert!(normalize(parse("[]")).is_empty());
    }
}
