//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, DisplayName},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::{HubError, HubHandle},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the outbox and pushes them to the WebSocket sender.
///
/// This handles the outbound flow: every broadcast the hub hands to this
/// connection's outbox is written to the socket. Ends when the outbox is
/// detached or the socket write fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Spawns a task that reads frames from the socket and forwards them to the hub.
fn receiver_loop(
    mut receiver: SplitStream<WebSocket>,
    hub: HubHandle,
    connection_id: ConnectionId,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    if let Err(e) = forward_frame(&hub, connection_id, text.as_str()) {
                        tracing::error!("Dropping connection '{}': {}", connection_id, e);
                        break;
                    }
                }
                Message::Binary(data) => {
                    tracing::debug!("Ignoring {} byte binary frame", data.len());
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    })
}

fn forward_frame(hub: &HubHandle, connection_id: ConnectionId, frame: &str) -> Result<(), HubError> {
    match ClientEvent::from_frame(frame) {
        ClientEvent::Login { name } => hub.login(connection_id, DisplayName::from(name)),
        ClientEvent::Message { text } => hub.message(connection_id, text),
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();

    // Create a channel for this connection to receive broadcasts
    let (tx, rx) = mpsc::unbounded_channel();
    if let Err(e) = state.hub.connect(connection_id, tx) {
        tracing::error!("Rejecting connection '{}': {}", connection_id, e);
        return;
    }
    tracing::info!("Connection '{}' accepted", connection_id);

    let (sender, receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = receiver_loop(receiver, state.hub.clone(), connection_id);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state.hub.disconnect(connection_id) {
        Ok(()) => tracing::info!("Connection '{}' closed", connection_id),
        Err(e) => tracing::warn!("Failed to report close of '{}': {}", connection_id, e),
    }
}
