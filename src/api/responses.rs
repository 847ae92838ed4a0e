//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{state::TimerSnapshot, stats::DurationText};

/// API response structure for timer intent endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub snapshot: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, snapshot: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            snapshot,
        }
    }

    /// Create a response whose status mirrors the session phase
    pub fn accepted(message: String, snapshot: TimerSnapshot) -> Self {
        Self::new(snapshot.phase.clone(), message, snapshot)
    }

    /// Create a response for an intent the session refused
    pub fn rejected(message: String, snapshot: TimerSnapshot) -> Self {
        Self::new("rejected".to_string(), message, snapshot)
    }
}

/// Status response with the full display snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub snapshot: TimerSnapshot,
    pub ticker_active: bool,
    pub tick_interval_ms: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Formatted duration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatResponse {
    pub ms: i64,
    pub minutes: String,
    pub seconds: String,
    pub centiseconds: String,
    pub display: String,
}

impl FormatResponse {
    pub fn new(ms: i64, text: DurationText) -> Self {
        Self {
            ms,
            display: text.to_string(),
            minutes: text.minutes,
            seconds: text.seconds,
            centiseconds: text.centiseconds,
        }
    }
}

/// Error body for requests that fail outright
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
