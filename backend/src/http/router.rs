//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Directory
        .route("/houses", get(handlers::list_houses))
        .route("/houses/{id}", get(handlers::get_house))
        // Route planning
        .route("/routes/preview", post(handlers::preview_route))
        // Map
        .route("/map/config", get(handlers::map_config))
        .route("/map/availability", get(handlers::map_availability));

    Router::new()
        .route("/health", get(handlers::health_check))
        // Path the map widget polls for its quota decision.
        .route("/api/map-usage", get(handlers::map_availability))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
