//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    lifecycle::{Phase, SessionId},
    state::ScreenState,
};

/// Response for endpoints that change the screen
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub screen: ScreenState,
}

impl ApiResponse {
    pub fn new(status: &str, message: String, screen: ScreenState) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            screen,
        }
    }

    pub fn ok(message: String, screen: ScreenState) -> Self {
        Self::new("ok", message, screen)
    }

    pub fn error(message: String, screen: ScreenState) -> Self {
        Self::new("error", message, screen)
    }
}

/// Body of POST /animation
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackReport {
    pub playing: bool,
    #[serde(default)]
    pub session: Option<SessionId>,
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub phase: Phase,
    pub screen: ScreenState,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
