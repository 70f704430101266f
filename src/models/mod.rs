//! Request and Response models for the distance API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{AddressRequest, HistoryQuery};
pub use responses::{
    CacheStatsResponse, ClearResponse, DistanceResponse, ErrorResponse, HealthResponse,
    HistoryItem, HistoryListResponse, NamespaceStatsResponse, PaginationInfo,
};
