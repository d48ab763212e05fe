//! Server state and connection management.

use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    domain::{ConversationRepository, PresenceRegistry},
    infrastructure::DeliveryRouter,
    usecase::PresenceHub,
};

/// Query parameters for the WebSocket handshake
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub username: String,
}

/// Per-connection session handle, bound to exactly one identity for its
/// lifetime once registered.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    /// Outbound event channel, drained by the connection's forwarding task
    pub sender: mpsc::UnboundedSender<String>,
    /// Unix timestamp when connected (milliseconds)
    pub connected_at: i64,
    /// Session identifier, used for log correlation only
    pub session_id: Uuid,
}

/// Shared application state
pub struct AppState {
    /// Registry（presence の単一の信頼できる情報源）
    pub registry: Arc<dyn PresenceRegistry>,
    /// Per-pair conversation history store
    pub conversations: Arc<dyn ConversationRepository>,
    /// Connection lifecycle orchestration
    pub hub: Arc<PresenceHub>,
    /// Outbound event delivery
    pub router: Arc<DeliveryRouter>,
}
