// HTTP request handlers
use crate::domain::interaction::{PointerEvent, PointerEventError};
use crate::domain::window::{WindowError, WindowSelection};
use crate::presentation::app_state::AppState;
use crate::presentation::view::DashboardView;
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::stream::Stream;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error(transparent)]
    Pointer(#[from] PointerEventError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}

#[derive(Deserialize)]
pub struct MarkersRequest {
    pub show: bool,
}

fn current_view(state: &AppState) -> Json<DashboardView> {
    Json(DashboardView::new(
        state.dashboard.snapshot(),
        state.dashboard.presets(),
    ))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    current_view(&state)
}

/// Stream the dashboard as server-sent events, one event per state change
pub async fn dashboard_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.dashboard.subscribe();
    let presets = state.dashboard.presets().to_vec();

    let stream = async_stream::stream! {
        loop {
            let view = DashboardView::new(rx.borrow_and_update().clone(), &presets);
            match Event::default().event("dashboard").json_data(&view) {
                Ok(event) => yield Ok::<_, Infallible>(event),
                Err(e) => tracing::warn!("Failed to encode dashboard event: {}", e),
            }

            if rx.changed().await.is_err() {
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

pub async fn refresh_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    state.dashboard.refresh().await;
    current_view(&state)
}

pub async fn select_window(
    State(state): State<Arc<AppState>>,
    Json(selection): Json<WindowSelection>,
) -> Result<Json<DashboardView>, ApiError> {
    state.dashboard.select_window(selection).await?;
    Ok(current_view(&state))
}

pub async fn pointer_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<PointerEvent>,
) -> Result<Json<DashboardView>, ApiError> {
    state.dashboard.pointer(event)?;
    Ok(current_view(&state))
}

pub async fn pointer_leave(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    state.dashboard.hover_ended();
    current_view(&state)
}

pub async fn reset_interaction(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    state.dashboard.reset_interaction();
    current_view(&state)
}

pub async fn set_markers(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MarkersRequest>,
) -> Json<DashboardView> {
    state.dashboard.set_point_markers(request.show);
    current_view(&state)
}
