//! Real-time private messaging server library.
//!
//! Clients connect over a WebSocket, register a unique display name, receive
//! a live roster of online peers, and exchange direct messages that are kept
//! in memory for the lifetime of the process and replayable as history.

pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod time;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{build_app, run};
