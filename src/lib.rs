//! Address Distance - geocoded distance API with a namespaced TTL cache
//!
//! Geocodes pairs of addresses, measures the great-circle distance between
//! them, records each query and serves paginated history. Distance results
//! and history pages are cached per namespace; new distance results
//! invalidate the history namespace.

pub mod api;
pub mod cache;
pub mod config;
pub mod distance;
pub mod error;
pub mod geocoding;
pub mod history;
pub mod models;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
