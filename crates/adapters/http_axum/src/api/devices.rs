//! JSON REST handlers for platform device discovery.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use wattwise_app::ports::{DeviceStore, Platform};
use wattwise_domain::state::DiscoveredEntity;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<DiscoveredEntity>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/devices` — controllable entities known to the platform.
pub async fn list<S, P>(State(state): State<AppState<S, P>>) -> Result<ListResponse, ApiError>
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    let entities = state.platform.controllable_entities().await?;
    Ok(ListResponse::Ok(Json(entities)))
}
