// Router for the dashboard HTTP surface
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard_events, get_dashboard, health_check, pointer_event, pointer_leave,
    refresh_dashboard, reset_interaction, select_window, set_markers,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/events", get(dashboard_events))
        .route("/dashboard/refresh", post(refresh_dashboard))
        .route("/dashboard/window", put(select_window))
        .route("/dashboard/pointer", post(pointer_event))
        .route("/dashboard/pointer/leave", post(pointer_leave))
        .route("/dashboard/reset", post(reset_interaction))
        .route("/dashboard/markers", put(set_markers))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
