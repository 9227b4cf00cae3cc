//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::view::TimerView;

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    pub fn new(status: &str, message: impl Into<String>, timer: TimerView) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            timer,
        }
    }

    /// The timer is counting down
    pub fn running(message: impl Into<String>, timer: TimerView) -> Self {
        Self::new("running", message, timer)
    }

    /// A run exists but is not ticking
    pub fn paused(message: impl Into<String>, timer: TimerView) -> Self {
        Self::new("paused", message, timer)
    }

    /// No run exists
    pub fn idle(message: impl Into<String>, timer: TimerView) -> Self {
        Self::new("idle", message, timer)
    }

    /// The control had no effect in the current state
    pub fn ignored(message: impl Into<String>, timer: TimerView) -> Self {
        Self::new("ignored", message, timer)
    }
}

/// Status response with server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerView,
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
