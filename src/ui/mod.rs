//! WebSocket messaging server implementation.

mod handler;
mod runner;
mod signal;
pub mod state; // UseCase 層からアクセスするため public

pub use runner::{build_app, run};
