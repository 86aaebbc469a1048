//! Control-subsystem configuration.
//!
//! These types are deserialized from the daemon's configuration file; every
//! field has a default so an empty file still yields a working (if inert)
//! controller.

use serde::Deserialize;

use wattwise_domain::id::EntityId;

/// Sensor ids the condition reader and forecast service pull from.
///
/// Every entry is optional: an unconfigured signal reads as its neutral
/// default (0.0 for numbers, inactive for sessions, no forecast).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SensorsConfig {
    pub solar: Option<EntityId>,
    pub electricity_cost: Option<EntityId>,
    pub gas_cost: Option<EntityId>,
    /// Session flags are an OR across these indicator lists.
    pub free_session: Vec<EntityId>,
    pub saving_session: Vec<EntityId>,
    pub battery_level: Option<EntityId>,
    pub battery_power: Option<EntityId>,
    pub solar_forecast: Option<EntityId>,
    pub cost_forecast: Option<EntityId>,
}

/// Tunables of the control algorithm itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Whether automation starts enabled.
    pub automation_enabled: bool,
    /// Control loop period in seconds.
    pub tick_seconds: u64,
    /// Minimum seconds between actuations of a heating-class device.
    pub heating_min_change_interval: u64,
    /// COP assumed for the heating cost comparison.
    pub cop_coefficient: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            automation_enabled: true,
            tick_seconds: 30,
            heating_min_change_interval: 900,
            cop_coefficient: 3.5,
        }
    }
}
