//! Selection roster routes.

use super::control::run;
use crate::state::AppState;
use axum::{extract::State, Json};
use roster_core::{export_file_name, export_rows, ExportHeaders, ExportSheet, EXPORT_SHEET_NAME};
use roster_types::{ControlCommand, SessionState};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RemoveRequest {
    pub unit: String,
    pub serial: String,
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RemoveRequest>,
) -> Json<SessionState> {
    run(
        &state,
        ControlCommand::Remove {
            unit: req.unit,
            serial: req.serial,
        },
    )
    .await
}

/// GET /api/roster/export - the roster laid out as sheet rows.
pub async fn export(State(state): State<Arc<AppState>>) -> Json<ExportSheet> {
    let session = state.session.lock().await;
    let rows = export_rows(&session.state().roster, &ExportHeaders::default());

    Json(ExportSheet {
        file_name: export_file_name(chrono::Local::now().date_naive()),
        sheet_name: EXPORT_SHEET_NAME.to_string(),
        rows,
    })
}
