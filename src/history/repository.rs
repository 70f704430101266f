//! Query repository interface.
//!
//! Document-store shaped: records are created whole, listed with
//! skip/limit/sort, and counted.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coordinates of both endpoints of a query, `[latitude, longitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub point1: [f64; 2],
    pub point2: [f64; 2],
}

/// A query about to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuery {
    pub address1: String,
    pub address2: String,
    pub kilometers: f64,
    pub miles: f64,
    pub coordinates: Coordinates,
}

/// A persisted query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub id: String,
    pub address1: String,
    pub address2: String,
    pub kilometers: f64,
    pub miles: f64,
    pub coordinates: Coordinates,
    pub timestamp: DateTime<Utc>,
}

/// Field used to order listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

/// Persistence failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    /// Backing store cannot be reached
    #[error("repository unavailable: {0}")]
    Unavailable(String),

    /// Backing store rejected or failed the operation
    #[error("repository operation failed: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Storage for computed queries.
#[async_trait]
pub trait QueryRepository: Send + Sync {
    /// Stores a query and returns its id.
    async fn create(&self, query: NewQuery) -> Result<String>;

    /// Lists records ordered by `sort_field`, skipping `skip` and returning at most `limit`.
    async fn find_many(
        &self,
        skip: u64,
        limit: u64,
        sort_field: SortField,
        sort_order: SortOrder,
    ) -> Result<Vec<QueryRecord>>;

    /// Total number of stored records.
    async fn count(&self) -> Result<u64>;
}
