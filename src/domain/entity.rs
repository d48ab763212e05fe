//! Core domain models for the private messaging service.

use serde::{Deserialize, Serialize};

use super::value_object::{MessageContent, Timestamp, Username};

/// An immutable direct message exchanged between two users.
///
/// Messages are appended to a conversation and never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessage {
    /// Sender identity
    pub from: Username,
    /// Recipient identity
    pub to: Username,
    /// Validated message body
    pub content: MessageContent,
    /// Wall-clock send time (Unix milliseconds)
    pub sent_at: Timestamp,
    /// Store-wide ordering token, strictly increasing in append order.
    /// Zero until the message has been appended to a conversation store.
    pub seq: u64,
}

impl DirectMessage {
    /// Create a new message record. The sequence number is assigned by the
    /// conversation store when the message is appended.
    pub fn new(from: Username, to: Username, content: MessageContent, sent_at: Timestamp) -> Self {
        Self {
            from,
            to,
            content,
            sent_at,
            seq: 0,
        }
    }
}

/// Point-in-time view of the online users.
///
/// Always derived from the registry contents at the moment of emission,
/// never stored or cached independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    /// Online display names, sorted for a deterministic roster
    pub online_users: Vec<String>,
    /// Number of online users
    pub count: usize,
}

impl PresenceSnapshot {
    /// Build a snapshot from an iterator of online names. The names are
    /// copied and sorted so callers never observe the live registry state.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut online_users: Vec<String> = names.into_iter().map(Into::into).collect();
        online_users.sort();
        let count = online_users.len();
        Self {
            online_users,
            count,
        }
    }
}
