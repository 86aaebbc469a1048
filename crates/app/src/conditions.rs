//! Condition reader — assembles the per-tick signal snapshot.

use wattwise_domain::conditions::Conditions;
use wattwise_domain::id::EntityId;
use wattwise_domain::time;

use crate::config::SensorsConfig;
use crate::ports::Platform;

/// Reads the configured energy signals from the platform.
///
/// `snapshot` never fails: every individual read failure is logged and
/// replaced by the signal's neutral default so a degraded tick can still
/// run. No decisions are made here.
pub struct ConditionReader<P> {
    platform: P,
    sensors: SensorsConfig,
}

impl<P: Platform> ConditionReader<P> {
    pub fn new(platform: P, sensors: SensorsConfig) -> Self {
        Self { platform, sensors }
    }

    /// Take a fresh snapshot of all configured signals.
    pub async fn snapshot(&self) -> Conditions {
        let mut conditions = Conditions::neutral(time::now());
        conditions.solar_generation_w = self.numeric(self.sensors.solar.as_ref()).await;
        conditions.electricity_cost = self.numeric(self.sensors.electricity_cost.as_ref()).await;
        conditions.gas_cost = self.numeric(self.sensors.gas_cost.as_ref()).await;
        conditions.free_session = self.any_active(&self.sensors.free_session).await;
        conditions.saving_session = self.any_active(&self.sensors.saving_session).await;
        conditions.battery_level = self.optional_numeric(self.sensors.battery_level.as_ref()).await;
        conditions.battery_power = self.optional_numeric(self.sensors.battery_power.as_ref()).await;
        conditions
    }

    /// Numeric signal with a neutral 0.0 default.
    async fn numeric(&self, sensor: Option<&EntityId>) -> f64 {
        self.optional_numeric(sensor).await.unwrap_or(0.0)
    }

    /// Numeric signal that stays absent when unconfigured or unreadable.
    async fn optional_numeric(&self, sensor: Option<&EntityId>) -> Option<f64> {
        let sensor = sensor?;
        match self.platform.sensor_value(sensor).await {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(sensor = %sensor, error = %err, "sensor read failed");
                None
            }
        }
    }

    /// Logical OR across a list of independent session indicators.
    async fn any_active(&self, sensors: &[EntityId]) -> bool {
        for sensor in sensors {
            match self.platform.state(sensor).await {
                Ok(Some(state)) if state.is_active() => return true,
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(sensor = %sensor, error = %err, "session indicator read failed");
                }
            }
        }
        false
    }
}
