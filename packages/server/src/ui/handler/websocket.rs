//! WebSocket connection handlers.
//!
//! 1 接続につき受信タスクと送信タスクを 1 つずつ起動します。受信したイベントは
//! 到着順に Router へ渡され、Router からの push は接続専用のキュー経由で
//! 送信タスクが書き出します。

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionHandle, ConnectionId, Event},
    infrastructure::dto::websocket::EventMessage,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive events
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let handle = ConnectionHandle::new(ConnectionId::generate(), tx);
    let connection_id = handle.id();
    tracing::info!("Connection {} opened", connection_id);

    let state_clone = state.clone();
    let recv_handle = handle.clone();

    // Spawn a task to read events from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error on {}: {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text on {}: {}", connection_id, text.as_str());

                    let message = match serde_json::from_str::<EventMessage>(text.as_str()) {
                        Ok(message) => message,
                        Err(e) => {
                            tracing::warn!("Ignoring malformed event on {}: {}", connection_id, e);
                            continue;
                        }
                    };
                    match message.into_event() {
                        Some(event) => state_clone.router.handle(&recv_handle, event).await,
                        None => tracing::debug!("Ignoring event of unknown type on {}", connection_id),
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::debug!("Connection {} requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to write pushed events to this connection
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match serde_json::to_string(&EventMessage::from(event)) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to encode event: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, or delivery marked the connection dead,
    // abort the rest
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
        _ = handle.closed() => {
            recv_task.abort();
            send_task.abort();
        }
    };

    state.router.disconnect(connection_id).await;
    tracing::info!("Connection {} closed", connection_id);
}
