//! Nominatim (OpenStreetMap) geocoding client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{GeoLocation, Geocoder, GeocodingError};

/// Nominatim client configuration.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL, without the `/search` path
    pub base_url: String,
    /// User-Agent header; Nominatim rejects anonymous clients
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".into(),
            user_agent: "AddressDistanceAPI/1.0".into(),
            timeout_seconds: 10,
        }
    }
}

/// One element of the `/search?format=json` array. Coordinates come back as strings.
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: String,
}

impl SearchResult {
    fn into_location(self) -> Result<GeoLocation, GeocodingError> {
        let latitude = self
            .lat
            .parse::<f64>()
            .map_err(|e| GeocodingError::InvalidResponse(format!("lat '{}': {}", self.lat, e)))?;
        let longitude = self
            .lon
            .parse::<f64>()
            .map_err(|e| GeocodingError::InvalidResponse(format!("lon '{}': {}", self.lon, e)))?;

        Ok(GeoLocation::new(latitude, longitude, self.display_name))
    }
}

/// HTTP client for the Nominatim search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    http_client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodingError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::Service(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeoLocation, GeocodingError> {
        let response = self
            .http_client
            .get(self.search_url())
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| GeocodingError::Service(e.to_string()))?;

        debug!(status = %response.status(), url = %response.url(), "nominatim responded");

        let response = response
            .error_for_status()
            .map_err(|e| GeocodingError::Service(e.to_string()))?;

        let results: Vec<SearchResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::InvalidResponse(e.to_string()))?;

        parse_first(results, address)
    }
}

fn parse_first(results: Vec<SearchResult>, address: &str) -> Result<GeoLocation, GeocodingError> {
    results
        .into_iter()
        .next()
        .ok_or_else(|| GeocodingError::NotFound(address.to_string()))?
        .into_location()
}
