//! Distance calculation service: geocode both addresses, measure, persist.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use super::math::great_circle;
use crate::geocoding::{Geocoder, GeocodingError};
use crate::history::{Coordinates, NewQuery, QueryRepository, RepositoryError};
use crate::models::DistanceResponse;

/// Failure of a distance calculation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistanceError {
    /// One or both addresses could not be geocoded; every failure is kept
    #[error("Failed to calculate distance")]
    Geocoding(Vec<GeocodingError>),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Computes and records distances between addresses.
#[derive(Clone)]
pub struct DistanceService {
    geocoder: Arc<dyn Geocoder>,
    repository: Arc<dyn QueryRepository>,
}

impl DistanceService {
    pub fn new(geocoder: Arc<dyn Geocoder>, repository: Arc<dyn QueryRepository>) -> Self {
        Self {
            geocoder,
            repository,
        }
    }

    /// Geocodes both addresses concurrently, computes the great-circle
    /// distance and persists the query.
    ///
    /// Nothing is persisted unless both lookups succeed.
    pub async fn calculate_distance(
        &self,
        address1: &str,
        address2: &str,
    ) -> Result<DistanceResponse, DistanceError> {
        let (first, second) = tokio::join!(
            self.geocoder.geocode(address1),
            self.geocoder.geocode(address2)
        );

        let (location1, location2) = match (first, second) {
            (Ok(a), Ok(b)) => (a, b),
            (first, second) => {
                let errors: Vec<GeocodingError> =
                    [first.err(), second.err()].into_iter().flatten().collect();
                debug!(?errors, "geocoding failed");
                return Err(DistanceError::Geocoding(errors));
            }
        };

        let distance = great_circle(location1.point(), location2.point());

        let query_id = self
            .repository
            .create(NewQuery {
                address1: location1.address.clone(),
                address2: location2.address.clone(),
                kilometers: distance.kilometers,
                miles: distance.miles,
                coordinates: Coordinates {
                    point1: [location1.latitude, location1.longitude],
                    point2: [location2.latitude, location2.longitude],
                },
            })
            .await?;

        let rounded = distance.rounded();
        info!(query_id = %query_id, km = rounded.kilometers, "distance calculated");

        Ok(DistanceResponse {
            kilometers: rounded.kilometers,
            miles: rounded.miles,
            address1: location1,
            address2: location2,
            query_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoding::GeoLocation;
    use crate::history::MemoryRepository;
    use async_trait::async_trait;

    struct FixedGeocoder;

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn geocode(&self, address: &str) -> Result<GeoLocation, GeocodingError> {
            match address {
                "nyc" => Ok(GeoLocation::new(40.7128, -74.0060, "New York")),
                "la" => Ok(GeoLocation::new(34.0522, -118.2437, "Los Angeles")),
                "down" => Err(GeocodingError::Service("503".to_string())),
                other => Err(GeocodingError::NotFound(other.to_string())),
            }
        }
    }

    fn service() -> (DistanceService, Arc<MemoryRepository>) {
        let repo = Arc::new(MemoryRepository::new());
        (DistanceService::new(Arc::new(FixedGeocoder), repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_calculate_and_persist() {
        let (service, repo) = service();

        let result = service.calculate_distance("nyc", "la").await.unwrap();

        assert!((result.kilometers - 3935.75).abs() < 0.01);
        assert_eq!(result.address1.address, "New York");
        assert_eq!(result.address2.address, "Los Angeles");
        assert_eq!(repo.count().await.unwrap(), 1);

        let stored = repo
            .find_many(0, 1, crate::history::SortField::Timestamp, crate::history::SortOrder::Desc)
            .await
            .unwrap();
        assert_eq!(stored[0].id, result.query_id);
        assert_eq!(stored[0].coordinates.point2, [34.0522, -118.2437]);
    }

    #[tokio::test]
    async fn test_both_failures_are_reported() {
        let (service, repo) = service();

        let err = service.calculate_distance("atlantis", "down").await.unwrap_err();

        assert_eq!(
            err,
            DistanceError::Geocoding(vec![
                GeocodingError::NotFound("atlantis".to_string()),
                GeocodingError::Service("503".to_string()),
            ])
        );
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_single_failure_persists_nothing() {
        let (service, repo) = service();

        let err = service.calculate_distance("nyc", "atlantis").await.unwrap_err();

        assert!(matches!(err, DistanceError::Geocoding(ref errors) if errors.len() == 1));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
