//! WebSocket connection handlers.
//!
//! Each connection runs two tasks: one dispatching inbound client events to
//! the usecases, one forwarding routed events from the connection's channel
//! to the socket. No shared lock is ever held across socket I/O.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    domain::Username,
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    time::now_timestamp_millis,
    ui::state::{AppState, ConnectQuery, ConnectionHandle},
    usecase::{ConnectError, GetChatHistoryUseCase, SendMessageUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> Username (Domain Model). An empty name is rejected
    // before the upgrade: the connection never enters Online and gets no
    // notice, per the handshake contract.
    let username = match Username::new(&query.username) {
        Ok(name) => name,
        Err(_) => {
            tracing::warn!("rejecting handshake with empty username");
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, username)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, username: Username) {
    let session_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();

    // Create the outbound channel for this connection
    let (tx, mut rx) = mpsc::unbounded_channel();
    let connection = ConnectionHandle {
        sender: tx,
        connected_at: now_timestamp_millis(),
        session_id,
    };

    match state.hub.connect(username.clone(), connection).await {
        Ok(_) => {
            tracing::info!("'{}' connected (session {})", username, session_id);
        }
        Err(ConnectError::DuplicateName(name)) => {
            tracing::warn!(
                "'{}' is already online, rejecting session {}",
                name,
                session_id
            );
            // Single rejection notice, flushed before the close. SinkExt
            // completes the send before returning, so no fixed delay is
            // needed to get the notice out.
            let notice = serde_json::to_string(&ServerEvent::DuplicateLogin {}).unwrap();
            if sender.send(Message::Text(notice.into())).await.is_ok() {
                let _ = sender.close().await;
            }
            return;
        }
    }

    let username_clone = username.clone();
    let state_clone = state.clone();

    // Dispatch inbound client events
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error for '{}': {}", username_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!(
                                "ignoring malformed event from '{}': {}",
                                username_clone,
                                e
                            );
                            continue;
                        }
                    };
                    dispatch_event(&state_clone, &username_clone, event).await;
                }
                Message::Close(_) => {
                    tracing::info!("'{}' requested close", username_clone);
                    break;
                }
                Message::Ping(_) => {
                    tracing::debug!("received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                _ => {}
            }
        }
    });

    // Forward routed events from this connection's channel to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Idempotent: a second disconnect signal for the same name is a no-op
    state.hub.disconnect(&username).await;
    tracing::info!("'{}' session {} closed", username, session_id);
}

/// Route one inbound event to its usecase. Validation failures are logged
/// and dropped; the sender gets no negative acknowledgment.
async fn dispatch_event(state: &Arc<AppState>, username: &Username, event: ClientEvent) {
    match event {
        ClientEvent::PrivateMessage { to_user, content } => {
            let usecase =
                SendMessageUseCase::new(state.registry.clone(), state.conversations.clone());
            match usecase.execute(username, &to_user, &content).await {
                Ok(message) => {
                    // Echo to the sender and deliver to the recipient; one
                    // display path on both ends. A recipient that vanished
                    // after validation is dropped by the router.
                    let event = ServerEvent::private_message(&message);
                    state.router.unicast(&message.from, &event).await;
                    state.router.unicast(&message.to, &event).await;
                }
                Err(e) => {
                    tracing::warn!("dropping private message from '{}': {}", username, e);
                }
            }
        }
        ClientEvent::GetChatHistory { user } => {
            let usecase =
                GetChatHistoryUseCase::new(state.registry.clone(), state.conversations.clone());
            match usecase.execute(username, &user).await {
                Ok((peer, messages)) => {
                    let event = ServerEvent::chat_history(&peer, &messages);
                    state.router.unicast(username, &event).await;
                }
                Err(e) => {
                    tracing::warn!("dropping history request from '{}': {}", username, e);
                }
            }
        }
    }
}
