//! Control session routes.

use crate::commands::execute;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use roster_core::LoadSummary;
use roster_types::{ControlCommand, SessionState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Apply a command and return the resulting state.
pub(crate) async fn run(state: &AppState, command: ControlCommand) -> Json<SessionState> {
    let mut session = state.session.lock().await;
    execute(&mut session, command);
    Json(session.state().clone())
}

pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    run(&state, ControlCommand::GetState).await
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub loaded: LoadSummary,
    pub state: SessionState,
}

/// POST /api/directory - raw workbook bytes.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    info!(target: "roster::api", "Received workbook upload ({} bytes)", body.len());

    let mut session = state.session.lock().await;
    let loaded = session
        .upload(&body)
        .map_err(|e| {
            warn!(target: "roster::api", "Workbook upload failed: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string())
        })?
        .ok_or_else(|| {
            (
                StatusCode::CONFLICT,
                "A directory is already loaded; reset first".to_string(),
            )
        })?;

    Ok(Json(UploadResponse {
        loaded,
        state: session.state().clone(),
    }))
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub unit: String,
    #[serde(default)]
    pub serial: String,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Json<SessionState> {
    run(
        &state,
        ControlCommand::Search {
            unit: req.unit,
            serial: req.serial,
        },
    )
    .await
}

pub async fn finish(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    run(&state, ControlCommand::Finish).await
}

pub async fn back(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    run(&state, ControlCommand::BackToSearch).await
}

pub async fn reset(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    run(&state, ControlCommand::Reset).await
}

pub async fn dismiss_error(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    run(&state, ControlCommand::DismissError).await
}

#[derive(Deserialize)]
pub struct UnitDetailRequest {
    pub unit: String,
}

pub async fn show_unit_detail(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UnitDetailRequest>,
) -> Json<SessionState> {
    run(&state, ControlCommand::ShowUnitDetail { unit: req.unit }).await
}

pub async fn close_unit_detail(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    run(&state, ControlCommand::CloseUnitDetail).await
}
