//! HTTP API endpoint handlers.
//!
//! Thin presence queries for login flows and monitoring. The messaging core
//! never depends on these.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    domain::Username,
    infrastructure::dto::http::{PresenceSummaryDto, UserPresenceDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current presence snapshot
pub async fn get_presence(State(state): State<Arc<AppState>>) -> Json<PresenceSummaryDto> {
    let snapshot = state.registry.snapshot().await;
    Json(PresenceSummaryDto {
        online_users: snapshot.online_users,
        online_count: snapshot.count,
    })
}

/// Per-user presence check, used by login pages to test name availability
pub async fn get_user_presence(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Json<UserPresenceDto> {
    let online = match Username::new(&username) {
        Ok(name) => state.registry.is_online(&name).await,
        Err(_) => false,
    };
    Json(UserPresenceDto { username, online })
}
