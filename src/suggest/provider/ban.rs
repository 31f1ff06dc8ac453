//! Base Adresse Nationale geocoding client
//!
//! Queries a data.gouv.fr-style address endpoint and normalizes its
//! GeoJSON-like feature collection into `Suggestion` records. All results
//! from this shape are municipalities.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use super::ProviderError;
use crate::suggest::suggestion::{PlaceKind, Suggestion};

const PROVIDER: &str = "ban";

#[derive(Debug, Clone)]
pub struct BanClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl BanClient {
    pub fn new(endpoint: String, timeout_ms: u64) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Fetch municipality suggestions, racing the request against the token.
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
            .query(&[
                ("q", query),
                ("limit", limit_param.as_str()),
                ("autocomplete", "1"),
                ("type", "municipality"),
            ])
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

        let payload: FeatureCollection =
            response.json().await.map_err(|e| ProviderError::Parse {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })?;

        Ok(normalize(payload))
    }
}

/// GeoJSON-like response shape of the address endpoint
///
/// An absent or empty `features` array is a valid "no results" answer.
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
    geometry: FeatureGeometry,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    name: String,
    #[serde(default)]
    context: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeatureGeometry {
    /// GeoJSON order: [longitude, latitude]
    coordinates: Vec<f64>,
}

fn normalize(payload: FeatureCollection) -> Vec<Suggestion> {
    payload
        .features
        .into_iter()
        .filter_map(|feature| {
            if feature.geometry.coordinates.len() < 2 {
                log::debug!(
                    "skipping feature {:?} with malformed coordinates",
                    feature.properties.name
                );
                return None;
            }
            let longitude = feature.geometry.coordinates[0];
            let latitude = feature.geometry.coordinates[1];
            let mut suggestion = Suggestion::new(
                feature.properties.name,
                latitude,
                longitude,
                PlaceKind::Municipality,
            );
            if let Some(context) = feature.properties.context {
                suggestion = suggestion.with_context(context);
            }
            Some(suggestion)
        })
        .collect()
}
