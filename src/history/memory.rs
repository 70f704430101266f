//! In-memory query repository.
//!
//! Thread-safe storage for single-process deployments and tests.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::repository::{
    NewQuery, QueryRecord, QueryRepository, Result, SortField, SortOrder,
};

/// Records kept in insertion order behind one lock.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: RwLock<Vec<QueryRecord>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueryRepository for MemoryRepository {
    async fn create(&self, query: NewQuery) -> Result<String> {
        let record = QueryRecord {
            id: Uuid::new_v4().to_string(),
            address1: query.address1,
            address2: query.address2,
            kilometers: query.kilometers,
            miles: query.miles,
            coordinates: query.coordinates,
            timestamp: Utc::now(),
        };
        let id = record.id.clone();

        self.records.write().await.push(record);
        debug!(id = %id, "stored query");

        Ok(id)
    }

    async fn find_many(
        &self,
        skip: u64,
        limit: u64,
        sort_field: SortField,
        sort_order: SortOrder,
    ) -> Result<Vec<QueryRecord>> {
        let records = self.records.read().await;

        // Ties keep insertion order, so equal timestamps still list newest
        // first under Desc.
        let mut indexed: Vec<(usize, &QueryRecord)> = records.iter().enumerate().collect();
        indexed.sort_by(|(ia, a), (ib, b)| {
            let ord = compare(a, b, sort_field).then(ia.cmp(ib));
            match sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });

        Ok(indexed
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.read().await.len() as u64)
    }
}

fn compare(a: &QueryRecord, b: &QueryRecord, field: SortField) -> Ordering {
    match field {
        SortField::Timestamp => a.timestamp.cmp(&b.timestamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Coordinates;

    fn query(name: &str, km: f64) -> NewQuery {
        NewQuery {
            address1: format!("{} A", name),
            address2: format!("{} B", name),
            kilometers: km,
            miles: km / 1.609344,
            coordinates: Coordinates {
                point1: [0.0, 0.0],
                point2: [1.0, 1.0],
            },
        }
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let repo = MemoryRepository::new();

        let a = repo.create(query("a", 1.0)).await.unwrap();
        let b = repo.create(query("b", 2.0)).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_many_newest_first() {
        let repo = MemoryRepository::new();
        for (i, name) in ["first", "second", "third"].iter().enumerate() {
            repo.create(query(name, i as f64)).await.unwrap();
        }

        let records = repo
            .find_many(0, 10, SortField::Timestamp, SortOrder::Desc)
            .await
            .unwrap();

        let names: Vec<_> = records.iter().map(|r| r.address1.as_str()).collect();
        assert_eq!(names, ["third A", "second A", "first A"]);
    }

    #[tokio::test]
    async fn test_find_many_skip_and_limit() {
        let repo = MemoryRepository::new();
        for i in 0..5 {
            repo.create(query(&format!("q{}", i), i as f64)).await.unwrap();
        }

        let page = repo
            .find_many(2, 2, SortField::Timestamp, SortOrder::Asc)
            .await
            .unwrap();
        let names: Vec<_> = page.iter().map(|r| r.address1.as_str()).collect();
        assert_eq!(names, ["q2 A", "q3 A"]);

        let past_end = repo
            .find_many(10, 2, SortField::Timestamp, SortOrder::Asc)
            .await
            .unwrap();
        assert!(past_end.is_empty());
    }
}
