//! UseCase layer error definitions.
//!
//! Validation failures never cross the connection boundary: except for the
//! duplicate-name rejection notice, the WebSocket handler logs these and
//! drops the offending request without notifying the sender.

use thiserror::Error;

/// Errors returned by the connection lifecycle
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// The display name is already bound to a live connection. The rejected
    /// client gets a single `duplicate_login` notice, then the connection
    /// is closed.
    #[error("username '{0}' is already online")]
    DuplicateName(String),
}

/// Errors returned by message sending
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// Sender is not registered (stale connection or race with disconnect)
    #[error("sender is not registered")]
    UnknownSender,

    /// Message body is empty after trimming
    #[error("message content is empty")]
    EmptyContent,

    /// Message body exceeds the maximum length
    #[error("message content cannot exceed {max} characters (got {actual})")]
    ContentTooLong { max: usize, actual: usize },

    /// Recipient is not online at validation time
    #[error("recipient '{0}' is not online")]
    UnknownRecipient(String),
}

/// Errors returned by history requests
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// Requester is not registered
    #[error("requester is not registered")]
    UnknownRequester,

    /// Peer name is empty after trimming
    #[error("peer name is empty")]
    EmptyPeerName,
}
