pub mod health;

use axum::{routing::get, Router};

use crate::journal::handlers;
use crate::mood::handlers::handle_submit;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/entries",
            get(handlers::handle_list_entries).post(handle_submit),
        )
        .route("/api/v1/entries/:index", get(handlers::handle_get_entry))
        .route("/api/v1/chart", get(handlers::handle_chart))
        .with_state(state)
}
