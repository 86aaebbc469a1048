//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod automation;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod energy;
#[allow(clippy::missing_errors_doc)]
pub mod forecast;
#[allow(clippy::missing_errors_doc)]
pub mod managed;

use axum::Router;
use axum::routing::{get, post, put};

use wattwise_app::ports::{DeviceStore, Platform};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, P>() -> Router<AppState<S, P>>
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    Router::new()
        // Devices
        .route("/devices", get(devices::list::<S, P>))
        .route(
            "/devices/managed",
            get(managed::list::<S, P>).post(managed::create::<S, P>),
        )
        .route(
            "/devices/managed/{id}",
            put(managed::update::<S, P>).delete(managed::delete::<S, P>),
        )
        .route(
            "/devices/managed/{id}/schedule",
            get(managed::schedule::<S, P>),
        )
        // Energy
        .route("/energy/status", get(energy::status::<S, P>))
        .route("/heating/comparison", get(energy::heating_comparison::<S, P>))
        // Automation
        .route("/automation/status", get(automation::status::<S, P>))
        .route("/automation/toggle", post(automation::toggle::<S, P>))
        // Forecasts
        .route("/forecast/solar", get(forecast::solar::<S, P>))
        .route("/forecast/cost", get(forecast::cost::<S, P>))
}
