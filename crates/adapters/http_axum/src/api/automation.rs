//! JSON REST handlers for the global automation switch.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use wattwise_app::automation_switch::AutomationStatus;
use wattwise_app::ports::{DeviceStore, Platform};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for toggling automation.
#[derive(Deserialize)]
pub struct ToggleRequest {
    pub enabled: bool,
}

/// Possible responses from the status and toggle endpoints.
pub enum StatusResponse {
    Ok(Json<AutomationStatus>),
}

impl IntoResponse for StatusResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/automation/status`
pub async fn status<S, P>(State(state): State<AppState<S, P>>) -> Result<StatusResponse, ApiError>
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    Ok(StatusResponse::Ok(Json(state.switch.status())))
}

/// `POST /api/automation/toggle`
///
/// Disabling only suppresses the next tick's decision phase; in-flight
/// actuation is never aborted.
pub async fn toggle<S, P>(
    State(state): State<AppState<S, P>>,
    Json(req): Json<ToggleRequest>,
) -> Result<StatusResponse, ApiError>
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    state.switch.set_enabled(req.enabled);
    Ok(StatusResponse::Ok(Json(state.switch.status())))
}
