//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use crate::state::{AppState, TimerError, TimerState};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Rejections carry a status code and, when the timer could be read, its current view
type Rejection = Response;

/// Turn the result of a timer transition into a handler response
fn transition_response(
    state: &AppState,
    action: &str,
    result: Result<TimerState, TimerError>,
) -> Result<Json<ApiResponse>, Rejection> {
    match result {
        Ok(timer) => {
            info!("{} endpoint called - countdown {}", action, timer.display());
            Ok(Json(ApiResponse::from_timer(
                format!("Timer {} applied", action),
                timer,
            )))
        }
        Err(e @ TimerError::AlreadyRunning) => {
            warn!("{} rejected: timer is already running", action);
            match state.get_timer_state() {
                Ok(timer) => Err((
                    StatusCode::CONFLICT,
                    Json(ApiResponse::error(e.to_string(), timer)),
                )
                    .into_response()),
                Err(_) => Err(StatusCode::CONFLICT.into_response()),
            }
        }
        Err(e) => {
            error!("Failed to apply {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
    }
}

/// Handle POST /play - Start the countdown
pub async fn play_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, Rejection> {
    transition_response(&state, "play", state.play())
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, Rejection> {
    transition_response(&state, "pause", state.pause())
}

/// Handle POST /resume - Resume a paused countdown
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, Rejection> {
    transition_response(&state, "resume", state.resume())
}

/// Handle POST /stop - Stop and reset the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, Rejection> {
    transition_response(&state, "stop", state.stop())
}

/// Handle POST /press/primary - Press the start/pause/resume button
pub async fn primary_press_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, Rejection> {
    transition_response(&state, "primary press", state.press_primary())
}

/// Handle POST /press/cancel - Press the reset button
pub async fn cancel_press_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, Rejection> {
    transition_response(&state, "cancel press", state.press_cancel())
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    match state.get_timer_state() {
        Ok(timer) => Ok(Json(StatusResponse::new(&state, timer))),
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::from_timer(state.get_timer_state()))
}
