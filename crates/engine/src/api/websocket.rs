//! WebSocket handling for Player connections.
//!
//! One task per socket plus one forwarder task draining the connection's
//! outbound channel. On connect the client gets a leaderboard snapshot
//! immediately, then lives off pushes until it disconnects.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use driftline_shared::{ClientMessage, ErrorCode, ServerMessage};

use crate::app::App;

/// Buffer size for per-connection message channel.
const CONNECTION_CHANNEL_BUFFER: usize = 64;

pub async fn ws_handler(ws: WebSocketUpgrade, State(app): State<Arc<App>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app))
}

/// Handle an individual WebSocket connection.
async fn handle_socket(socket: WebSocket, app: Arc<App>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let connection_id = Uuid::new_v4();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(CONNECTION_CHANNEL_BUFFER);

    app.connections.register(connection_id, tx.clone());
    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    // Forward messages from the channel to the socket.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    // Subscribers see the current standings right away, not on the next
    // catch.
    send_snapshot(&app, connection_id, &tx).await;

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(text.as_str()) {
                Ok(msg) => handle_message(msg, &app, connection_id, &tx).await,
                Err(e) => {
                    tracing::warn!(connection_id = %connection_id, error = %e, "Failed to parse message");
                    let error = ServerMessage::Error {
                        code: ErrorCode::ParseError,
                        message: format!("Invalid message format: {e}"),
                    };
                    let _ = tx.try_send(error);
                }
            },
            Ok(Message::Ping(_)) => {
                let _ = tx.try_send(ServerMessage::Pong);
            }
            Ok(Message::Close(_)) => {
                tracing::info!(connection_id = %connection_id, "WebSocket closed by client");
                break;
            }
            Err(e) => {
                tracing::error!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    app.connections.unregister(connection_id);
    send_task.abort();

    tracing::info!(connection_id = %connection_id, "WebSocket connection terminated");
}

async fn handle_message(
    msg: ClientMessage,
    app: &Arc<App>,
    connection_id: Uuid,
    tx: &mpsc::Sender<ServerMessage>,
) {
    match msg {
        ClientMessage::Heartbeat => {
            let _ = tx.try_send(ServerMessage::Pong);
        }
        ClientMessage::LeaderboardGet => {
            send_snapshot(app, connection_id, tx).await;
        }
    }
}

async fn send_snapshot(app: &Arc<App>, connection_id: Uuid, tx: &mpsc::Sender<ServerMessage>) {
    match app.use_cases.leaderboard.project().await {
        Ok(entries) => {
            if tx
                .try_send(ServerMessage::LeaderboardUpdate { entries })
                .is_err()
            {
                tracing::warn!(
                    connection_id = %connection_id,
                    "Failed to send snapshot, channel full or closed"
                );
            }
        }
        Err(e) => {
            tracing::warn!(connection_id = %connection_id, error = %e, "Failed to build leaderboard snapshot");
            let _ = tx.try_send(ServerMessage::Error {
                code: ErrorCode::Internal,
                message: "Leaderboard unavailable".to_string(),
            });
        }
    }
}
