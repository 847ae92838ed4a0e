//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::{
    error::TimerError,
    state::{AppState, LapTimerState, TimerSnapshot},
    stats::format_duration,
};
use super::responses::{ApiResponse, ErrorResponse, FormatResponse, HealthResponse, StatusResponse};

/// HTTP status for a failed timer operation
fn status_for(error: &TimerError) -> StatusCode {
    match error {
        TimerError::AlreadyRunning | TimerError::NotRunning | TimerError::ResetWhileRunning => {
            StatusCode::CONFLICT
        }
        TimerError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        TimerError::StateUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: &TimerError) -> Response {
    (status_for(error), Json(ErrorResponse::new(error.to_string()))).into_response()
}

/// Turn the outcome of a user intent into a response.
///
/// Rejected transitions still carry the unchanged snapshot so the caller can
/// redraw.
fn intent_response(
    state: &AppState,
    intent: &str,
    result: Result<LapTimerState, TimerError>,
    message: &str,
) -> Response {
    match result {
        Ok(session) => {
            info!("{} endpoint called - {}", intent, message);
            Json(ApiResponse::accepted(
                message.to_string(),
                TimerSnapshot::from_state(&session),
            ))
            .into_response()
        }
        Err(e) if e.is_transition() => {
            warn!("Rejected {} intent: {}", intent, e);
            match state.snapshot() {
                Ok(snapshot) => (
                    status_for(&e),
                    Json(ApiResponse::rejected(e.to_string(), snapshot)),
                )
                    .into_response(),
                Err(snapshot_error) => {
                    error!("Failed to read session: {}", snapshot_error);
                    error_response(&snapshot_error)
                }
            }
        }
        Err(e) => {
            error!("Failed to handle {} intent: {}", intent, e);
            error_response(&e)
        }
    }
}

/// Handle POST /start - Begin a new session
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Response {
    let result = state.start();
    intent_response(&state, "start", result, "Timer started")
}

/// Handle POST /lap - Close the current lap
pub async fn lap_handler(State(state): State<Arc<AppState>>) -> Response {
    let result = state.lap();
    intent_response(&state, "lap", result, "Lap recorded")
}

/// Handle POST /stop - Freeze the session
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Response {
    let result = state.stop();
    intent_response(&state, "stop", result, "Timer stopped")
}

/// Handle POST /reset - Clear a stopped session
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Response {
    let result = state.reset();
    intent_response(&state, "reset", result, "Timer reset")
}

/// Handle GET /status - Return the current display snapshot
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, Response> {
    let snapshot = state.snapshot().map_err(|e| {
        error!("Failed to get session snapshot: {}", e);
        error_response(&e)
    })?;

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        snapshot,
        ticker_active: state.ticker_active(),
        tick_interval_ms: u64::try_from(state.tick_interval.as_millis()).unwrap_or(u64::MAX),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    pub ms: i64,
}

/// Handle GET /format?ms=N - Format a millisecond count as MM:SS,CC
pub async fn format_handler(Query(query): Query<FormatQuery>) -> Result<Json<FormatResponse>, Response> {
    format_duration(query.ms)
        .map(|text| Json(FormatResponse::new(query.ms, text)))
        .map_err(|e| {
            warn!("Rejected format request: {}", e);
            error_response(&e)
        })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(status_for(&TimerError::AlreadyRunning), StatusCode::CONFLICT);
        assert_eq!(status_for(&TimerError::NotRunning), StatusCode::CONFLICT);
        assert_eq!(status_for(&TimerError::ResetWhileRunning), StatusCode::CONFLICT);
        assert_eq!(status_for(&TimerError::InvalidArgument(-5)), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&TimerError::StateUnavailable("poisoned".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
