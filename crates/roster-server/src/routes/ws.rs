//! WebSocket route handler.

use crate::control_ws::handle_control_websocket;
use crate::display_ws::handle_display_websocket;
use crate::state::AppState;
use axum::{
    extract::{ws::WebSocketUpgrade, Path, State},
    response::Response,
};
use roster_types::Role;
use std::sync::Arc;

/// GET /ws/{role} - the role is fixed for the lifetime of the connection.
pub async fn upgrade(
    State(state): State<Arc<AppState>>,
    Path(role): Path<Role>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| async move {
        let result = match role {
            Role::Control => handle_control_websocket(socket, state).await,
            Role::Display => handle_display_websocket(socket, state).await,
        };
        if let Err(e) = result {
            tracing::error!(target: "roster::ws", "WebSocket error ({} context): {}", role, e);
        }
    })
}
