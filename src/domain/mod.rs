//! Domain layer for the private messaging service.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use entity::{DirectMessage, PresenceSnapshot};
pub use error::{RegistryError, ValueObjectError};
pub use repository::{ConversationRepository, PresenceRegistry};
#[cfg(test)]
pub use repository::{MockConversationRepository, MockPresenceRegistry};
pub use value_object::{ConversationKey, MessageContent, Timestamp, Username};
