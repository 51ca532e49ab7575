//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{domain::Identity, ui::state::AppState};

use super::{
    auth::{authenticate, bearer_token},
    signaling::dispatch,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: Option<String>,
}

/// Verifies the identity token before accepting the upgrade.
///
/// The token is read from the `token` query parameter, falling back to an
/// `Authorization: Bearer` header. Unauthenticated requests get 401 and never
/// reach the room registry.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    let token = query.token.or_else(|| bearer_token(&headers));
    let identity = authenticate(&state, token).await?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, identity)))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// Every outbound frame for this connection goes through this task, so frames
/// reach the client in the order they were pushed.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, identity: Identity) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let mut connection = state
        .connect_participant_usecase
        .execute(identity, tx)
        .await;
    let mut send_task = pusher_loop(rx, sender);

    // Inbound frames are handled one at a time, in arrival order.
    loop {
        tokio::select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!("Received from {}: {}", connection.id, text.as_str());
                        dispatch(&state, &mut connection, text.as_str()).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Connection {} requested close", connection.id);
                        break;
                    }
                    Some(Ok(Message::Binary(_))) => {
                        tracing::debug!("Ignoring binary frame from {}", connection.id);
                    }
                    // Ping/pong is handled automatically by the WebSocket protocol
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket error on {}: {}", connection.id, e);
                        break;
                    }
                }
            }
            _ = &mut send_task => {
                tracing::debug!("Outbound stream of {} closed", connection.id);
                break;
            }
        }
    }
    send_task.abort();

    state
        .disconnect_participant_usecase
        .execute(&mut connection)
        .await;
}
