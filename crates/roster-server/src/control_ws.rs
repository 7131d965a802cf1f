//! Control WebSocket: operator commands in, session state out.

use crate::commands::execute;
use crate::state::AppState;
use anyhow::Result;
use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use roster_types::{ControlCommand, ControlFrame};
use std::sync::Arc;
use tracing::{debug, info};

/// Maximum size for a command frame (16KB)
const MAX_COMMAND_SIZE: usize = 16 * 1024;

pub async fn handle_control_websocket(socket: WebSocket, state: Arc<AppState>) -> Result<()> {
    let (mut ws_tx, mut ws_rx) = socket.split();
    info!(target: "roster::ws", "Control connected");

    let initial = state_frame(&state).await;
    ws_tx.send(Message::Text(serde_json::to_string(&initial)?.into())).await?;

    while let Some(Ok(msg)) = ws_rx.next().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => {
                debug!(target: "roster::ws", "Control client closed connection");
                break;
            }
            _ => continue,
        };

        if text.as_str().len() > MAX_COMMAND_SIZE {
            let frame = ControlFrame::Error {
                message: format!("Command too large: {} bytes", text.as_str().len()),
            };
            ws_tx.send(Message::Text(serde_json::to_string(&frame)?.into())).await?;
            continue;
        }

        // Unknown commands are dropped without a reply
        let Some(command) = ControlCommand::decode(text.as_str()) else {
            continue;
        };

        let frame = {
            let mut session = state.session.lock().await;
            execute(&mut session, command);
            ControlFrame::State {
                state: Box::new(session.state().clone()),
            }
        };
        if ws_tx.send(Message::Text(serde_json::to_string(&frame)?.into())).await.is_err() {
            debug!(target: "roster::ws", "Control client disconnected");
            break;
        }
    }

    info!(target: "roster::ws", "Control disconnected");
    Ok(())
}

async fn state_frame(state: &AppState) -> ControlFrame {
    let session = state.session.lock().await;
    ControlFrame::State {
        state: Box::new(session.state().clone()),
    }
}
