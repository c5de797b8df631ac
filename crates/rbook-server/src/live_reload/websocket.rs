//! Live reload socket.
//!
//! Each client receives [`ReloadEvent`]s as JSON text frames. A client that
//! connects while the last sidebar edit is rejected gets that error first.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use rbook_site::Site;
use tokio::sync::broadcast::error::RecvError;

use super::manager::ReloadEvent;
use crate::state::AppState;

/// Handle WebSocket upgrade for live reload.
pub(crate) async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let Some(live_reload) = &state.live_reload else {
        return;
    };
    // Subscribe before reading the status so no event falls in between
    let mut receiver = live_reload.subscribe();

    let status = current_status(&state.site);
    if matches!(status, ReloadEvent::Error { .. })
        && send_event(&mut socket, &status).await.is_err()
    {
        return;
    }

    loop {
        tokio::select! {
            result = receiver.recv() => {
                let event = match result {
                    Ok(event) => event,
                    Err(RecvError::Closed) => break,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "Live reload client lagged");
                        current_status(&state.site)
                    }
                };
                if send_event(&mut socket, &event).await.is_err() {
                    break;
                }
            }
            // Anything but a close is a keepalive
            message = socket.recv() => {
                match message {
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }
}

/// Event describing the snapshot clients should show now.
fn current_status(site: &Site) -> ReloadEvent {
    match site.last_error() {
        Some(err) => ReloadEvent::Error {
            message: err.to_string(),
        },
        None => ReloadEvent::Reload,
    }
}

async fn send_event(socket: &mut WebSocket, event: &ReloadEvent) -> Result<(), axum::Error> {
    let text = serde_json::to_string(event).map_err(axum::Error::new)?;
    socket.send(Message::Text(text.into())).await
}
