//! Axum WebSocket upgrade handler.

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::session::serve;
use crate::app_state::AppState;
use crate::error::SessionError;

/// `GET /output` — Upgrade HTTP connection to WebSocket.
///
/// The session subscribes only after the handshake completes, so a failed
/// upgrade never leaves a registration behind.
pub async fn output_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let bus = state.event_bus;

    ws.on_failed_upgrade(|err| {
        tracing::warn!(error = %SessionError::Upgrade(err), "dropping consumer");
    })
    .on_upgrade(move |socket| serve(socket, bus))
}
