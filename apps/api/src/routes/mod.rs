pub mod handlers;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/search", post(handlers::handle_search))
        .route("/api/v1/feed/rank", post(handlers::handle_feed_rank))
        .route("/api/v1/usage", get(handlers::handle_usage_report))
        .with_state(state)
}
