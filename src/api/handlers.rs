//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    services::MessageRecord,
    state::{AppState, TimerSnapshot},
};
use super::responses::{
    ApiResponse, CustomDurationRequest, HealthResponse, ModeRequest, NewMessageRequest,
    StatusResponse,
};

type ControlResult = Result<Json<ApiResponse>, StatusCode>;

/// Wrap a control outcome, logging and mapping state failures to 500
fn control_response(operation: &str, result: Result<TimerSnapshot, String>) -> ControlResult {
    match result {
        Ok(timer) => Ok(Json(ApiResponse::from_timer(
            format!("{} applied", operation),
            timer,
        ))),
        Err(e) => {
            error!("Failed to {}: {}", operation, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /timer - Return the timer read surface
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerSnapshot>, StatusCode> {
    state.get_timer_snapshot().map(Json).map_err(|e| {
        error!("Failed to get timer snapshot: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle POST /timer/toggle - Start or pause the countdown
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> ControlResult {
    control_response("start or pause", state.start_or_pause())
}

/// Handle POST /timer/reset - Refill the current period and pause
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ControlResult {
    control_response("reset", state.reset())
}

/// Handle POST /timer/skip - Advance to the next period
pub async fn skip_handler(State(state): State<Arc<AppState>>) -> ControlResult {
    control_response("skip", state.skip())
}

/// Handle POST /timer/mode - Switch timing mode
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ModeRequest>,
) -> ControlResult {
    control_response("change mode", state.change_mode(request.mode))
}

/// Handle POST /timer/custom - Commit one custom duration
pub async fn custom_duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CustomDurationRequest>,
) -> Result<(StatusCode, Json<ApiResponse>), StatusCode> {
    match state.set_custom_duration(request.period, &request.minutes) {
        Ok(Some(timer)) => Ok((
            StatusCode::OK,
            Json(ApiResponse::from_timer(
                format!("{} duration set", request.period.label()),
                timer,
            )),
        )),
        Ok(None) => {
            let timer = state.get_timer_snapshot().map_err(|e| {
                error!("Failed to get timer snapshot: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
            Ok((
                StatusCode::CONFLICT,
                Json(ApiResponse::rejected(
                    "Custom durations can only be changed in custom mode".to_string(),
                    timer,
                )),
            ))
        }
        Err(e) => {
            error!("Failed to set custom duration: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/custom/apply - Close the editor and restart the period
pub async fn apply_custom_handler(State(state): State<Arc<AppState>>) -> ControlResult {
    control_response("apply custom durations", state.apply_custom_durations())
}

/// Handle POST /timer/cycles/reset - Zero the completed-cycle counter
pub async fn reset_cycles_handler(State(state): State<Arc<AppState>>) -> ControlResult {
    control_response("reset cycle counter", state.reset_cycle_counter())
}

/// Handle GET /messages/latest - Most recent stored message, or null
pub async fn latest_message_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<MessageRecord>>, StatusCode> {
    match state.messages.latest() {
        Ok(record) => Ok(Json(record)),
        Err(e) => {
            warn!("Failed to read latest message: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle POST /messages - Append a message
pub async fn add_message_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewMessageRequest>,
) -> Result<(StatusCode, Json<MessageRecord>), StatusCode> {
    match state.messages.append(request.message) {
        Ok(record) => {
            info!("Message stored at {}", record.time);
            Ok((StatusCode::CREATED, Json(record)))
        }
        Err(e) => {
            warn!("Failed to store message: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle GET /status - Return timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

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
