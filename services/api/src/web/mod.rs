pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use rest::{
    estimate_handler, health_handler, history_handler, history_trend_handler,
    save_footprint_handler,
};
pub use state::AppState;

/// Builds the API router. Any origin may call it, as the calculator page is
/// served from elsewhere.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/footprint", post(save_footprint_handler))
        .route("/api/history", get(history_handler))
        .route("/api/history/trend", get(history_trend_handler))
        .route("/api/estimate", post(estimate_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
