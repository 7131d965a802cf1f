//! HTTP route handlers.

pub mod control;
pub mod roster;
pub mod ws;

use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use roster_core::SyncBus;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub topic: String,
    pub displays: usize,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        topic: state.bus.topic().to_string(),
        displays: state.bus.subscriber_count(),
    })
}

/// API and WebSocket routes, without static files or middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/state", get(control::get_state))
        .route(
            "/directory",
            post(control::upload).layer(DefaultBodyLimit::max(state.config.max_upload_bytes)),
        )
        .route("/search", post(control::search))
        .route("/finish", post(control::finish))
        .route("/back", post(control::back))
        .route("/reset", post(control::reset))
        .route("/error/dismiss", post(control::dismiss_error))
        .route(
            "/unit-detail",
            post(control::show_unit_detail).delete(control::close_unit_detail),
        )
        .route("/roster/remove", post(roster::remove))
        .route("/roster/export", get(roster::export))
        .route("/health", get(health));

    let ws_routes = Router::new().route("/{role}", get(ws::upgrade));

    Router::new()
        .nest("/api", api_routes)
        .nest("/ws", ws_routes)
        .with_state(state)
}
