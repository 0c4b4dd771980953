use crate::handlers::{events, stats};
use crate::state::AppState;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/stat", get(stats::get_stats))
        .route("/{category}", get(events::register_event))
        .fallback(events::register_event)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
