//! History listing service.

use std::sync::Arc;

use tracing::debug;

use super::repository::{QueryRepository, Result, SortField, SortOrder};
use crate::models::{HistoryItem, HistoryListResponse, PaginationInfo};

/// Paginates stored queries, newest first.
#[derive(Clone)]
pub struct HistoryService {
    repository: Arc<dyn QueryRepository>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn QueryRepository>) -> Self {
        Self { repository }
    }

    /// Returns one page of history. `page` is 1-based.
    pub async fn get_history(&self, page: u32, page_size: u32) -> Result<HistoryListResponse> {
        let skip = u64::from(page.saturating_sub(1)) * u64::from(page_size);
        let sort_order = SortOrder::Desc;

        debug!(page, page_size, skip, %sort_order, "reading history page");

        let total = self.repository.count().await?;
        let records = self
            .repository
            .find_many(skip, u64::from(page_size), SortField::Timestamp, sort_order)
            .await?;

        Ok(HistoryListResponse {
            items: records.into_iter().map(HistoryItem::from).collect(),
            pagination: PaginationInfo::new(total, page, page_size),
        })
    }
}
