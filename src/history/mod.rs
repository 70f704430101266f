//! History Module
//!
//! Persistence of computed queries and the paginated history listing.

mod memory;
mod repository;
mod service;

pub use memory::MemoryRepository;
pub use repository::{
    Coordinates, NewQuery, QueryRecord, QueryRepository, RepositoryError, SortField, SortOrder,
};
pub use service::HistoryService;
