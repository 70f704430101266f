//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, calculate_distance_handler, clear_all_handler, clear_namespace_handler,
    health_handler, history_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST {prefix}/distance/calculate` - Distance between two addresses
/// - `GET {prefix}/history` - Paginated query history
/// - `GET {prefix}/cache/stats` - Per-namespace cache statistics
/// - `DELETE {prefix}/cache/:namespace` - Clear one cache namespace
/// - `DELETE {prefix}/cache` - Clear every cache namespace
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState, api_prefix: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/distance/calculate", post(calculate_distance_handler))
        .route("/history", get(history_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache/:namespace", delete(clear_namespace_handler))
        .route("/cache", delete(clear_all_handler));

    // `nest` rejects an empty or root prefix.
    let prefix = api_prefix.trim_end_matches('/');
    let routes = if prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(prefix, api)
    };

    routes
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
