use axum::{
    routing::{get, post},
    Router,
};
use shiftboard_store::ScheduleStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::http::{health, timeslots, volunteers};

/// Shared state handed to every handler as `Arc<AppState>`.
pub struct AppState {
    pub store: ScheduleStore,
}

impl AppState {
    pub fn new(store: ScheduleStore) -> Self {
        Self { store }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/volunteers",
            get(volunteers::list_or_find).post(volunteers::register),
        )
        .route(
            "/timeslots",
            get(timeslots::list).post(timeslots::create),
        )
        .route("/timeslots/delete", post(timeslots::delete))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
