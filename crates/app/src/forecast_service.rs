//! Forecast service — pulls forecast series from the platform and computes
//! optimal run windows.
//!
//! Forecasts arrive as an attribute on a configured sensor: a `forecast`
//! list whose items carry a timestamp plus a `power` (solar) or
//! `cost_per_kwh` (price) value. The series is consumed as supplied and
//! never mutated; any fetch or parse failure yields an empty series so
//! callers degrade to "no recommendation" instead of erroring.

use serde::{Deserialize, Serialize};

use wattwise_domain::forecast::{self, ForecastPoint, Slot};
use wattwise_domain::id::EntityId;
use wattwise_domain::time::Timestamp;

use crate::config::SensorsConfig;
use crate::ports::Platform;

/// Run duration assumed when a device has none configured, in minutes.
pub const DEFAULT_RUN_DURATION_MIN: u32 = 60;

/// Optimal run windows for one device, by solar yield and by cost.
#[derive(Debug, Clone, Serialize)]
pub struct OptimalSchedule {
    pub entity_id: EntityId,
    pub required_run_duration: u32,
    pub optimal_solar_slots: Vec<Slot>,
    pub cheapest_cost_slots: Vec<Slot>,
}

#[derive(Debug, Deserialize)]
struct RawForecastPoint {
    timestamp: Timestamp,
    #[serde(default)]
    power: Option<f64>,
    #[serde(default)]
    cost_per_kwh: Option<f64>,
}

/// Reads forecast series and runs the slot search over them.
pub struct ForecastService<P> {
    platform: P,
    sensors: SensorsConfig,
}

impl<P: Platform> ForecastService<P> {
    pub fn new(platform: P, sensors: SensorsConfig) -> Self {
        Self { platform, sensors }
    }

    /// The solar generation forecast, in watts per point.
    pub async fn solar_forecast(&self) -> Vec<ForecastPoint> {
        self.series(self.sensors.solar_forecast.as_ref(), |raw| raw.power)
            .await
    }

    /// The electricity cost forecast, per kWh per point.
    pub async fn cost_forecast(&self) -> Vec<ForecastPoint> {
        self.series(self.sensors.cost_forecast.as_ref(), |raw| raw.cost_per_kwh)
            .await
    }

    /// Best windows for a device with the given run duration.
    pub async fn optimal_schedule(
        &self,
        entity_id: EntityId,
        required_run_duration: Option<u32>,
    ) -> OptimalSchedule {
        let duration = required_run_duration.unwrap_or(DEFAULT_RUN_DURATION_MIN);
        let solar = self.solar_forecast().await;
        let cost = self.cost_forecast().await;
        OptimalSchedule {
            entity_id,
            required_run_duration: duration,
            optimal_solar_slots: forecast::best_power_slots(&solar, duration),
            cheapest_cost_slots: forecast::best_cost_slots(&cost, duration),
        }
    }

    async fn series(
        &self,
        sensor: Option<&EntityId>,
        value: impl Fn(&RawForecastPoint) -> Option<f64>,
    ) -> Vec<ForecastPoint> {
        let Some(sensor) = sensor else {
            return Vec::new();
        };

        let state = match self.platform.state(sensor).await {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::debug!(sensor = %sensor, "forecast sensor unknown to platform");
                return Vec::new();
            }
            Err(err) => {
                tracing::warn!(sensor = %sensor, error = %err, "forecast read failed");
                return Vec::new();
            }
        };

        let Some(raw) = state.attributes.get("forecast") else {
            tracing::debug!(sensor = %sensor, "forecast attribute missing");
            return Vec::new();
        };

        match serde_json::from_value::<Vec<RawForecastPoint>>(raw.clone()) {
            Ok(points) => points
                .iter()
                .filter_map(|raw| {
                    value(raw).map(|value| ForecastPoint {
                        timestamp: raw.timestamp,
                        value,
                    })
                })
                .collect(),
            Err(err) => {
                tracing::warn!(sensor = %sensor, error = %err, "forecast attribute malformed");
                Vec::new()
            }
        }
    }
}
