//! API Handlers
//!
//! HTTP request handlers. Cached endpoints consult the cache facade first,
//! fall through to the service on a miss, then populate the cache.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use crate::cache::{CacheClient, DistanceKey, HistoryKey, Lookup, NamespacedStore};
use crate::config::Config;
use crate::distance::DistanceService;
use crate::error::{AppError, Result};
use crate::geocoding::{Geocoder, GeocodingError, NominatimClient};
use crate::history::{HistoryService, MemoryRepository, QueryRepository};
use crate::models::{
    AddressRequest, CacheStatsResponse, ClearResponse, DistanceResponse, HealthResponse,
    HistoryListResponse, HistoryQuery,
};

/// Application state shared across all handlers.
///
/// Every collaborator is constructed once and injected here; handlers hold
/// no other shared state.
#[derive(Clone)]
pub struct AppState {
    /// Namespaced cache shared by all requests
    pub cache: CacheClient,
    pub distance: DistanceService,
    pub history: HistoryService,
}

impl AppState {
    /// Creates a new AppState from explicit collaborators.
    pub fn new(
        cache: CacheClient,
        geocoder: Arc<dyn Geocoder>,
        repository: Arc<dyn QueryRepository>,
    ) -> Self {
        Self {
            cache,
            distance: DistanceService::new(geocoder, repository.clone()),
            history: HistoryService::new(repository),
        }
    }

    /// Creates a new AppState from configuration: Nominatim geocoder,
    /// in-memory repository and a cache sized by the config.
    pub fn from_config(config: &Config) -> std::result::Result<Self, GeocodingError> {
        let cache = CacheClient::new(NamespacedStore::new(config.max_entries, config.default_ttl))
            .with_history_ttl(config.history_ttl);
        let geocoder = NominatimClient::new(config.nominatim())?;

        Ok(Self::new(
            cache,
            Arc::new(geocoder),
            Arc::new(MemoryRepository::new()),
        ))
    }
}

/// Handler for POST /distance/calculate
///
/// A cache hit returns without persisting anything or touching history.
/// A miss computes, persists, caches the result and invalidates history.
pub async fn calculate_distance_handler(
    State(state): State<AppState>,
    Json(req): Json<AddressRequest>,
) -> Result<Json<DistanceResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::Validation(error_msg));
    }

    let key = DistanceKey::new(&req.address1, &req.address2);
    if let Some(cached) = state.cache.get_distance(&key).await {
        debug!(key = %key, "serving cached distance");
        return Ok(Json(cached));
    }

    let result = state
        .distance
        .calculate_distance(req.address1.trim(), req.address2.trim())
        .await?;

    state.cache.put_distance(&key, &result).await;

    Ok(Json(result))
}

/// Handler for GET /history?page=&page_size=
///
/// A page read from the repository is only cached if no distance write
/// cleared the history namespace while it was being read.
pub async fn history_handler(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryListResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(AppError::Validation(error_msg));
    }

    let key = HistoryKey::new(query.page, query.page_size);
    let generation = match state.cache.get_history(key).await {
        Lookup::Hit(cached) => {
            debug!(key = %key, "serving cached history page");
            return Ok(Json(cached));
        }
        Lookup::Miss(generation) => generation,
    };

    let page = state
        .history
        .get_history(query.page, query.page_size)
        .await?;

    state.cache.put_history(key, &page, generation).await;

    Ok(Json(page))
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse::new(state.cache.stats().await))
}

/// Handler for DELETE /cache/:namespace
pub async fn clear_namespace_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> Json<ClearResponse> {
    let removed = state.cache.clear_namespace(&namespace).await;
    Json(ClearResponse::new(&format!("namespace '{}'", namespace), removed))
}

/// Handler for DELETE /cache
pub async fn clear_all_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.cache.clear_all().await;
    Json(ClearResponse::new("all namespaces", removed))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
