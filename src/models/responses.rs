//! Response DTOs for the distance API
//!
//! Defines the structure of outgoing HTTP response bodies. Distance and
//! history responses also round-trip through the cache, so they derive
//! `Deserialize` as well.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::NamespaceStats;
use crate::geocoding::GeoLocation;
use crate::history::QueryRecord;

/// Response body for POST /distance/calculate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResponse {
    /// Distance in kilometers, rounded to two decimals
    pub kilometers: f64,
    /// Distance in miles, rounded to two decimals
    pub miles: f64,
    /// Geocoded first address
    pub address1: GeoLocation,
    /// Geocoded second address
    pub address2: GeoLocation,
    /// Identifier of the persisted query
    pub query_id: String,
}

/// One past query in the history listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub query_id: String,
    pub kilometers: f64,
    pub miles: f64,
    pub address1: String,
    pub address2: String,
    pub timestamp: DateTime<Utc>,
}

impl From<QueryRecord> for HistoryItem {
    fn from(record: QueryRecord) -> Self {
        Self {
            query_id: record.id,
            kilometers: record.kilometers,
            miles: record.miles,
            address1: record.address1,
            address2: record.address2,
            timestamp: record.timestamp,
        }
    }
}

/// Pagination block of the history listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl PaginationInfo {
    /// Builds pagination info; `total_pages` is `ceil(total / page_size)`.
    pub fn new(total: u64, page: u32, page_size: u32) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(u64::from(page_size))
        };
        Self {
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

/// Response body for GET /history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryListResponse {
    pub items: Vec<HistoryItem>,
    pub pagination: PaginationInfo,
}

/// Stats of one namespace, with derived hit rate
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub clears: u64,
    pub total_entries: usize,
    pub hit_rate: f64,
}

impl From<NamespaceStats> for NamespaceStatsResponse {
    fn from(stats: NamespaceStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            clears: stats.clears,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for GET /cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub namespaces: BTreeMap<String, NamespaceStatsResponse>,
}

impl CacheStatsResponse {
    pub fn new(stats: BTreeMap<String, NamespaceStats>) -> Self {
        Self {
            namespaces: stats
                .into_iter()
                .map(|(name, stats)| (name, stats.into()))
                .collect(),
        }
    }
}

/// Response body for the cache clearing endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub removed: usize,
}

impl ClearResponse {
    pub fn new(scope: &str, removed: usize) -> Self {
        Self {
            message: format!("Cleared {}", scope),
            removed,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// Individual messages when several inputs failed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_details(error: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            error: error.into(),
            errors,
        }
    }
}
