//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    catalog::{present_choices, DurationChoice},
    error::{AppError, HostError, LifecycleError},
    lifecycle::SavedState,
    state::{AppState, ScreenState},
};
use super::responses::{ApiResponse, HealthResponse, PlaybackReport, StatusResponse};

type HandlerResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// Map a failed command onto a status code, keeping the current screen in the body
fn reject(state: &AppState, err: AppError) -> (StatusCode, Json<ApiResponse>) {
    let status = match &err {
        AppError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Lifecycle(LifecycleError::UnknownChoice(_)) => StatusCode::NOT_FOUND,
        AppError::Lifecycle(LifecycleError::NoActiveSession) => StatusCode::CONFLICT,
        AppError::Lifecycle(
            LifecycleError::InvalidSelection { .. } | LifecycleError::InconsistentSnapshot(_),
        ) => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::Lifecycle(LifecycleError::Host(HostError::AnimationUnavailable(_))) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    if status.is_server_error() {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }
    (status, Json(ApiResponse::error(err.to_string(), state.screen())))
}

/// Handle GET /choices - List the duration catalog
pub async fn choices_handler() -> Json<Vec<DurationChoice>> {
    Json(present_choices().collect())
}

/// Handle POST /select/:label - Start a session for a catalog entry
pub async fn select_handler(
    State(state): State<Arc<AppState>>,
    Path(label): Path<String>,
) -> HandlerResult {
    match state.choose(&label).await {
        Ok(selection) => {
            info!("Select endpoint called - {}s session started", selection.total_seconds());
            Ok(Json(ApiResponse::ok(
                format!(
                    "Started {}s hourglass with {} loops",
                    selection.total_seconds(),
                    selection.repeat_count()
                ),
                state.screen(),
            )))
        }
        Err(e) => Err(reject(&state, e)),
    }
}

/// Handle POST /restart - Return to the selection panel
pub async fn restart_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    match state.restart().await {
        Ok(()) => {
            info!("Restart endpoint called - back to selection");
            Ok(Json(ApiResponse::ok(
                "Back to selection".to_string(),
                state.screen(),
            )))
        }
        Err(e) => Err(reject(&state, e)),
    }
}

/// Handle POST /animation - Playback report from an external renderer
pub async fn animation_handler(
    State(state): State<Arc<AppState>>,
    Json(report): Json<PlaybackReport>,
) -> HandlerResult {
    match state.report_playback(report.session, report.playing).await {
        Ok(()) => Ok(Json(ApiResponse::ok(
            format!("Playback reported: playing={}", report.playing),
            state.screen(),
        ))),
        Err(e) => Err(reject(&state, e)),
    }
}

/// Handle GET /screen - Current screen model
pub async fn screen_handler(State(state): State<Arc<AppState>>) -> Json<ScreenState> {
    Json(state.screen())
}

/// Handle GET /session - Saved state record for recreating the screen
pub async fn save_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SavedState>, (StatusCode, Json<ApiResponse>)> {
    state
        .save()
        .await
        .map(Json)
        .map_err(|e| reject(&state, e))
}

/// Handle POST /session - Restore from a saved state record
pub async fn restore_handler(
    State(state): State<Arc<AppState>>,
    Json(saved): Json<SavedState>,
) -> HandlerResult {
    match state.restore(saved).await {
        Ok(phase) => {
            info!("Restore endpoint called - phase {:?}", phase);
            Ok(Json(ApiResponse::ok(
                format!("Restored in phase {:?}", phase),
                state.screen(),
            )))
        }
        Err(e) => Err(reject(&state, e)),
    }
}

/// Handle GET /status - Return current status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let screen = state.screen();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        phase: screen.phase,
        screen,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
