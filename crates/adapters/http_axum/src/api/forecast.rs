//! JSON REST handlers for forecast series.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use wattwise_app::ports::{DeviceStore, Platform};
use wattwise_domain::forecast::ForecastPoint;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the forecast endpoints.
pub enum SeriesResponse {
    Ok(Json<Vec<ForecastPoint>>),
}

impl IntoResponse for SeriesResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/forecast/solar`
pub async fn solar<S, P>(State(state): State<AppState<S, P>>) -> Result<SeriesResponse, ApiError>
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    Ok(SeriesResponse::Ok(Json(state.forecast.solar_forecast().await)))
}

/// `GET /api/forecast/cost`
pub async fn cost<S, P>(State(state): State<AppState<S, P>>) -> Result<SeriesResponse, ApiError>
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    Ok(SeriesResponse::Ok(Json(state.forecast.cost_forecast().await)))
}
