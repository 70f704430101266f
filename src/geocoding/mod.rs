//! Geocoding Module
//!
//! Resolves free-text addresses to coordinates. The service depends on the
//! [`Geocoder`] trait; [`NominatimClient`] is the production implementation.

mod nominatim;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use nominatim::{NominatimClient, NominatimConfig};

/// A geocoded address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Provider's formatted name for the address
    pub address: String,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64, address: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            address: address.into(),
        }
    }

    /// `(latitude, longitude)` pair.
    pub fn point(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Geocoding failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodingError {
    /// Provider returned no match
    #[error("No results found for address: {0}")]
    NotFound(String),

    /// Transport failure or non-success status
    #[error("Geocoding service error: {0}")]
    Service(String),

    /// Provider answered with something we could not read
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Resolves one address to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<GeoLocation, GeocodingError>;
}
