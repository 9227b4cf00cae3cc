//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{
    AppState, InputEdit, InputOutcome, PauseOutcome, StartOutcome, StateError,
};
use crate::view::TimerView;
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

fn internal_error(action: &str, e: StateError) -> StatusCode {
    error!("Failed to {}: {}", action, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

fn render(state: &AppState, action: &str) -> Result<TimerView, StatusCode> {
    state.view().map_err(|e| internal_error(action, e))
}

/// Handle POST /start - Start button
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let outcome = state.start().map_err(|e| internal_error("start countdown", e))?;
    let timer = render(&state, "render timer")?;

    let response = match outcome {
        StartOutcome::Started { target } => {
            info!("Start endpoint called - new run of {}s", target);
            ApiResponse::running(format!("Countdown started for {}", timer.display), timer)
        }
        StartOutcome::Resumed { .. } => {
            info!("Start endpoint called - run resumed");
            ApiResponse::running("Countdown resumed", timer)
        }
        StartOutcome::AlreadyRunning => ApiResponse::ignored("Countdown already running", timer),
        StartOutcome::EmptyDuration => ApiResponse::ignored("Cannot start an empty timer", timer),
    };

    Ok(Json(response))
}

/// Handle POST /pause - Pause button
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let outcome = state.pause().map_err(|e| internal_error("pause countdown", e))?;
    let timer = render(&state, "render timer")?;

    let response = match outcome {
        PauseOutcome::Paused { .. } => {
            info!("Pause endpoint called - run paused");
            ApiResponse::paused("Countdown paused", timer)
        }
        PauseOutcome::NotRunning => ApiResponse::ignored("Countdown is not running", timer),
    };

    Ok(Json(response))
}

/// Handle POST /reset - Reset button
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let snapshot = state.reset().map_err(|e| internal_error("reset countdown", e))?;
    info!("Reset endpoint called - run cleared");
    Ok(Json(ApiResponse::idle(
        "Countdown reset",
        TimerView::render(&snapshot, state.bar_width),
    )))
}

/// Handle PUT /input - Hours/minutes/seconds inputs
pub async fn input_handler(
    State(state): State<Arc<AppState>>,
    Json(edit): Json<InputEdit>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.edit_input(&edit).map_err(|e| internal_error("edit input", e))? {
        InputOutcome::Updated(_) => {
            let timer = render(&state, "render timer")?;
            let message = format!(
                "Pending input set to {:02}:{:02}:{:02}",
                timer.inputs[0].value, timer.inputs[1].value, timer.inputs[2].value
            );
            let response = if timer.remaining_seconds > 0 {
                ApiResponse::paused(message, timer)
            } else {
                ApiResponse::idle(message, timer)
            };
            Ok(Json(response))
        }
        InputOutcome::Locked => Err(StatusCode::CONFLICT),
    }
}

/// Handle GET /timer - Rendered widget
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerView>, StatusCode> {
    render(&state, "render timer").map(Json)
}

/// Handle GET /status - Widget plus server information
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = render(&state, "get timer state")?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
