//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post, put},
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
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Control options and current selection
        .route("/options", get(handlers::get_options))
        .route("/selection", get(handlers::get_selection))
        // Input events
        .route("/selection/states", put(handlers::put_states))
        .route("/selection/cities", put(handlers::put_cities))
        .route("/selection/months", put(handlers::put_months))
        .route("/selection/min-delay", put(handlers::put_min_delay))
        .route("/selection/reset", post(handlers::reset_selection))
        // Derived view consumers
        .route("/view", get(handlers::get_view))
        .route("/view/table", get(handlers::get_table))
        .route("/view/chart", get(handlers::get_chart))
        .route("/view/stream", get(handlers::stream_view));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
