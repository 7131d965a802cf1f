//! Display WebSocket: one replica per audience screen.

use crate::state::AppState;
use anyhow::Result;
use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use roster_core::DisplayReplica;
use roster_types::DisplayFrame;
use std::sync::Arc;

/// Handle a display connection.
///
/// The replica is folded server-side; the client receives each applied
/// message together with the screen to render.
pub async fn handle_display_websocket(socket: WebSocket, state: Arc<AppState>) -> Result<()> {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut replica = DisplayReplica::attach(state.sync_bus());

    tracing::info!(target: "roster::ws", "Display connected ({} subscribers)", state.bus.subscriber_count());

    // Idle placeholder until the backlog or the first broadcast arrives
    let idle = DisplayFrame {
        message: None,
        screen: replica.screen(),
    };
    ws_tx.send(Message::Text(serde_json::to_string(&idle)?.into())).await?;

    let mut send_task = tokio::spawn(async move {
        loop {
            let message = match replica.next().await {
                Ok(message) => message,
                Err(e) => {
                    tracing::warn!(target: "roster::ws", "Display stream ended: {}", e);
                    break;
                }
            };

            let frame = DisplayFrame {
                message: Some(message),
                screen: replica.screen(),
            };
            let json = match serde_json::to_string(&frame) {
                Ok(j) => j,
                Err(_) => continue,
            };
            if ws_tx.send(Message::Text(json.into())).await.is_err() {
                tracing::debug!(target: "roster::ws", "Display client disconnected");
                break;
            }
        }
    });

    // Displays never publish; only watch for close
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = ws_rx.next().await {
            match msg {
                Message::Close(_) => {
                    tracing::debug!(target: "roster::ws", "Display client closed connection");
                    break;
                }
                Message::Text(_) | Message::Binary(_) => {
                    tracing::debug!(target: "roster::ws", "Ignoring inbound frame from display");
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    tracing::info!(target: "roster::ws", "Display disconnected");
    Ok(())
}
