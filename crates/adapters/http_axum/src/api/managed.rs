//! JSON REST handlers for the managed-device registry.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use wattwise_app::forecast_service::OptimalSchedule;
use wattwise_app::ports::{DeviceStore, Platform};
use wattwise_app::registry::{DeviceUpdate, ManagedDeviceView};
use wattwise_domain::device::{ManagedDevice, Schedule};
use wattwise_domain::error::{NotFoundError, WattwiseError};
use wattwise_domain::id::EntityId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a device.
#[derive(Deserialize)]
pub struct RegisterDeviceRequest {
    pub entity_id: EntityId,
    pub priority: Option<u8>,
    pub power_consumption: Option<f64>,
    pub enabled: Option<bool>,
    pub allow_direct_control: Option<bool>,
    pub schedule: Option<Schedule>,
    pub auto_start_automation: Option<EntityId>,
    pub required_run_duration: Option<u32>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<ManagedDeviceView>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<ManagedDevice>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Ok(Json<ManagedDevice>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Possible responses from the schedule endpoint.
pub enum ScheduleResponse {
    Ok(Json<OptimalSchedule>),
}

impl IntoResponse for ScheduleResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<EntityId, ApiError> {
    EntityId::from_str(raw).map_err(|err| ApiError::from(WattwiseError::Validation(err)))
}

/// `GET /api/devices/managed` — registry joined with live state.
pub async fn list<S, P>(State(state): State<AppState<S, P>>) -> Result<ListResponse, ApiError>
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    let devices = state.registry.list_with_state().await;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `POST /api/devices/managed` — register a device.
pub async fn create<S, P>(
    State(state): State<AppState<S, P>>,
    Json(req): Json<RegisterDeviceRequest>,
) -> Result<CreateResponse, ApiError>
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    let mut builder = ManagedDevice::builder();
    if let Some(priority) = req.priority {
        builder = builder.priority(priority);
    }
    if let Some(watts) = req.power_consumption {
        builder = builder.power_consumption(watts);
    }
    if let Some(enabled) = req.enabled {
        builder = builder.enabled(enabled);
    }
    if let Some(allow) = req.allow_direct_control {
        builder = builder.allow_direct_control(allow);
    }
    if let Some(schedule) = req.schedule {
        builder = builder.schedule(schedule);
    }
    if let Some(automation) = req.auto_start_automation {
        builder = builder.auto_start_automation(automation);
    }
    if let Some(duration) = req.required_run_duration {
        builder = builder.required_run_duration(duration);
    }

    let device = builder.build()?;
    state.registry.register(req.entity_id, device.clone()).await?;
    Ok(CreateResponse::Created(Json(device)))
}

/// `PUT /api/devices/managed/{id}` — partial update.
pub async fn update<S, P>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
    Json(req): Json<DeviceUpdate>,
) -> Result<UpdateResponse, ApiError>
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    state.registry.update(&device_id, req).await?;
    let device = state.registry.get(&device_id).ok_or_else(|| {
        ApiError::from(WattwiseError::from(NotFoundError {
            entity: "Device",
            id: device_id.to_string(),
        }))
    })?;
    Ok(UpdateResponse::Ok(Json(device)))
}

/// `DELETE /api/devices/managed/{id}` — idempotent removal.
pub async fn delete<S, P>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    state.registry.remove(&device_id).await;
    Ok(DeleteResponse::NoContent)
}

/// `GET /api/devices/managed/{id}/schedule` — optimal run windows.
pub async fn schedule<S, P>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> Result<ScheduleResponse, ApiError>
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    let device = state.registry.get(&device_id).ok_or_else(|| {
        ApiError::from(WattwiseError::from(NotFoundError {
            entity: "Device",
            id: device_id.to_string(),
        }))
    })?;

    let schedule = state
        .forecast
        .optimal_schedule(device_id, device.required_run_duration)
        .await;
    Ok(ScheduleResponse::Ok(Json(schedule)))
}
