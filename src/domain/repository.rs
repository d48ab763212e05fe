//! Repository traits owned by the domain layer.
//!
//! The UseCase layer depends on these traits; the infrastructure layer
//! provides the concrete implementations (dependency inversion).

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::ui::state::ConnectionHandle;

use super::{
    entity::{DirectMessage, PresenceSnapshot},
    error::RegistryError,
    value_object::{ConversationKey, Username},
};

/// Registry of online identities and their live connections.
///
/// Uniqueness invariant: at any instant at most one connection is bound to
/// a given display name. All mutations and reads go through one internal
/// lock, so the snapshots returned by `register` / `unregister` reflect the
/// registry contents at the instant of that mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    /// Bind `username` to `connection`. Atomic check-and-insert: exactly one
    /// caller wins a race for an identical name.
    ///
    /// Returns the presence snapshot taken right after the insert.
    async fn register(
        &self,
        username: Username,
        connection: ConnectionHandle,
    ) -> Result<PresenceSnapshot, RegistryError>;

    /// Remove the binding for `username`. Idempotent: returns `None` when the
    /// name was not registered (e.g. a duplicate disconnect signal), and the
    /// post-removal snapshot otherwise.
    async fn unregister(&self, username: &Username) -> Option<PresenceSnapshot>;

    /// Whether `username` is currently bound to a live connection.
    async fn is_online(&self, username: &Username) -> bool;

    /// Point-in-time copy of the online names.
    async fn snapshot(&self) -> PresenceSnapshot;

    /// Outbound channel of the live connection for `username`, if any.
    async fn sender_of(&self, username: &Username) -> Option<UnboundedSender<String>>;

    /// Push `payload` to every connection online at call time, under the
    /// registry lock. Sends are non-blocking, so no I/O happens while the
    /// lock is held. Returns the number of connections reached.
    async fn deliver_all(&self, payload: String) -> usize;
}

/// Keyed history of direct messages between each unordered pair of users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Append `message` to the conversation for `key`, creating the
    /// conversation on first use. Stamps the store-wide sequence number and
    /// returns the stored record. Existing entries are never reordered.
    async fn append(&self, key: ConversationKey, message: DirectMessage) -> DirectMessage;

    /// All messages for `key` in append order. An unknown key yields an
    /// empty sequence, not an error.
    async fn history(&self, key: &ConversationKey) -> Vec<DirectMessage>;
}
