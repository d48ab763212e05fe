//! Outbound event delivery.
//!
//! Routes a server event to one connection (unicast) or all connections
//! (broadcast) using the presence registry's live connection set. Delivery
//! is fire-and-forget: a recipient that went offline between validation and
//! send is silently skipped, and there is no queueing or retry. Events are
//! pushed onto per-connection unbounded channels, so a slow consumer never
//! blocks delivery to the others.

use std::sync::Arc;

use crate::domain::{PresenceRegistry, Username};

use super::dto::websocket::ServerEvent;

/// Routes serialized events to live connections.
pub struct DeliveryRouter {
    registry: Arc<dyn PresenceRegistry>,
}

impl DeliveryRouter {
    /// Create a router over the given registry.
    pub fn new(registry: Arc<dyn PresenceRegistry>) -> Self {
        Self { registry }
    }

    /// Deliver `event` to the live connection for `to`, if any. A missing or
    /// already-closed connection drops the event.
    pub async fn unicast(&self, to: &Username, event: &ServerEvent) {
        let payload = serde_json::to_string(event).unwrap();
        match self.registry.sender_of(to).await {
            Some(sender) => {
                if sender.send(payload).is_err() {
                    tracing::debug!("dropping event for '{}': connection closed", to);
                }
            }
            None => {
                tracing::debug!("dropping event for '{}': not online", to);
            }
        }
    }

    /// Deliver `event` to every connection online at call time. Returns the
    /// number of connections reached.
    pub async fn broadcast(&self, event: &ServerEvent) -> usize {
        let payload = serde_json::to_string(event).unwrap();
        self.registry.deliver_all(payload).await
    }
}
