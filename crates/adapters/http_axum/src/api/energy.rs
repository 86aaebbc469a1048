//! JSON REST handlers for energy status and the heating comparison.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use wattwise_app::ports::{DeviceStore, Platform};
use wattwise_domain::conditions::EnergyStatus;
use wattwise_domain::efficiency::HeatingComparison;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the status endpoint.
pub enum StatusResponse {
    Ok(Json<EnergyStatus>),
}

impl IntoResponse for StatusResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the comparison endpoint.
pub enum ComparisonResponse {
    Ok(Json<HeatingComparison>),
}

impl IntoResponse for ComparisonResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/energy/status` — a fresh condition snapshot plus controller
/// state.
pub async fn status<S, P>(State(state): State<AppState<S, P>>) -> Result<StatusResponse, ApiError>
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    let conditions = state.conditions.snapshot().await;
    Ok(StatusResponse::Ok(Json(EnergyStatus {
        solar_generation: conditions.solar_generation_w,
        electricity_cost: conditions.electricity_cost,
        gas_cost: conditions.gas_cost,
        is_free_session: conditions.free_session,
        is_saving_session: conditions.saving_session,
        automation_enabled: state.switch.is_enabled(),
        managed_device_count: state.registry.count(),
        timestamp: conditions.taken_at,
    })))
}

/// `GET /api/heating/comparison` — heat pump vs. gas at current prices.
pub async fn heating_comparison<S, P>(
    State(state): State<AppState<S, P>>,
) -> Result<ComparisonResponse, ApiError>
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    let conditions = state.conditions.snapshot().await;
    let comparison = HeatingComparison::calculate(
        conditions.electricity_cost,
        conditions.gas_cost,
        state.control.cop_coefficient,
    );
    Ok(ComparisonResponse::Ok(Json(comparison)))
}
