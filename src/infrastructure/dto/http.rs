//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Current presence snapshot for the presence endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceSummaryDto {
    #[serde(rename = "onlineUsers")]
    pub online_users: Vec<String>,
    #[serde(rename = "onlineCount")]
    pub online_count: usize,
}

/// Per-user presence check, used by login flows to test name availability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPresenceDto {
    pub username: String,
    pub online: bool,
}
