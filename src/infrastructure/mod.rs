//! Infrastructure layer: wire DTOs, delivery, and repository implementations.

pub mod delivery;
pub mod dto;
pub mod repository;

pub use delivery::DeliveryRouter;
