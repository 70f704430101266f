//! API Module
//!
//! HTTP handlers and routing for the distance service REST API.
//!
//! # Endpoints
//! - `POST /api/v1/distance/calculate` - Distance between two addresses
//! - `GET /api/v1/history` - Paginated query history
//! - `GET /api/v1/cache/stats` - Cache statistics
//! - `DELETE /api/v1/cache[/:namespace]` - Cache clearing
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
