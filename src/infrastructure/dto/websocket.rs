//! WebSocket event DTOs for the private messaging protocol.
//!
//! Every frame in either direction is a JSON envelope
//! `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{DirectMessage, PresenceSnapshot, Username},
    time::format_clock,
};

/// Events received from clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Send a direct message to another online user
    PrivateMessage { to_user: String, content: String },
    /// Request the conversation history with another user
    GetChatHistory { user: String },
}

/// Subtype of a presence-change notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemMessageKind {
    Join,
    Leave,
}

/// A delivered direct message as seen on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub from: String,
    pub to: String,
    pub content: String,
    /// Human-readable local send time (HH:MM:SS)
    pub time: String,
    /// Store-wide ordering token
    pub timestamp: u64,
}

impl From<&DirectMessage> for MessageDto {
    fn from(message: &DirectMessage) -> Self {
        Self {
            from: message.from.as_str().to_string(),
            to: message.to.as_str().to_string(),
            content: message.content.as_str().to_string(),
            time: format_clock(message.sent_at.value()),
            timestamp: message.seq,
        }
    }
}

/// Events emitted to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Registration rejected: the name is already online. The server closes
    /// the connection right after this notice is flushed.
    DuplicateLogin {},
    /// Post-registration state for the newly connected client
    Init {
        user: String,
        #[serde(rename = "onlineUsers")]
        online_users: Vec<String>,
        #[serde(rename = "onlineCount")]
        online_count: usize,
    },
    /// Presence change, broadcast to all online clients
    SystemMessage {
        r#type: SystemMessageKind,
        user: String,
        time: String,
        #[serde(rename = "onlineCount")]
        online_count: usize,
        #[serde(rename = "onlineUsers")]
        online_users: Vec<String>,
    },
    /// A delivered direct message (echoed to the sender as well)
    PrivateMessage(MessageDto),
    /// Conversation history response, unicast to the requester
    ChatHistory {
        user: String,
        messages: Vec<MessageDto>,
    },
}

impl ServerEvent {
    /// Build the `init` event for a freshly registered user.
    pub fn init(user: &Username, snapshot: &PresenceSnapshot) -> Self {
        Self::Init {
            user: user.as_str().to_string(),
            online_users: snapshot.online_users.clone(),
            online_count: snapshot.count,
        }
    }

    /// Build a join/leave presence notice carrying the given snapshot.
    pub fn system_message(
        kind: SystemMessageKind,
        user: &Username,
        snapshot: &PresenceSnapshot,
        time: String,
    ) -> Self {
        Self::SystemMessage {
            r#type: kind,
            user: user.as_str().to_string(),
            time,
            online_count: snapshot.count,
            online_users: snapshot.online_users.clone(),
        }
    }

    /// Build the delivery event for a stored direct message.
    pub fn private_message(message: &DirectMessage) -> Self {
        Self::PrivateMessage(MessageDto::from(message))
    }

    /// Build the history response for a conversation with `peer`.
    pub fn chat_history(peer: &Username, messages: &[DirectMessage]) -> Self {
        Self::ChatHistory {
            user: peer.as_str().to_string(),
            messages: messages.iter().map(MessageDto::from).collect(),
        }
    }
}
