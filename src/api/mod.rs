//! HTTP API module
//!
//! The screen is exposed read-only; user actions arrive as POSTs.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/choices", get(choices_handler))
        .route("/select/:label", post(select_handler))
        .route("/restart", post(restart_handler))
        .route("/animation", post(animation_handler))
        .route("/screen", get(screen_handler))
        .route("/session", get(save_handler).post(restore_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
