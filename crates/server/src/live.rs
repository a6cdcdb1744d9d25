use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::state::AppState;

// ── WebSocket Handler ───────────────────────────────────────────

pub async fn ws_upgrade(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // The observer is the sending half of this queue; attaching it pushes the
    // current snapshot as the first message.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let observer_id = state.scheduler.attach_observer(Box::new(tx)).await;
    info!(observer = %observer_id, "WebSocket client connected");

    // Forward queued status messages to this client.
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Inbound messages are only logged.
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => debug!("Received message: {}", text.as_str()),
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // Whichever side finishes first ends the connection.
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.scheduler.detach_observer(observer_id);
    info!(observer = %observer_id, "WebSocket client disconnected");
}
