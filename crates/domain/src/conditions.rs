//! Conditions — the per-tick snapshot of live energy signals.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Snapshot of the energy signals one control tick decides on.
///
/// Constructed at the start of a tick and discarded afterwards; it is never
/// persisted. Signals that could not be read carry their neutral default
/// (0.0, `false`, `None`) so a degraded snapshot still drives a tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conditions {
    /// Current solar generation in watts.
    pub solar_generation_w: f64,
    /// Current electricity cost per kWh.
    pub electricity_cost: f64,
    /// Current gas cost per kWh.
    pub gas_cost: f64,
    /// Utility-signaled zero-marginal-cost period.
    pub free_session: bool,
    /// Utility-signaled reduced-consumption period.
    pub saving_session: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_power: Option<f64>,
    pub taken_at: Timestamp,
}

impl Conditions {
    /// A fully neutral snapshot, as produced when every signal read fails.
    #[must_use]
    pub fn neutral(taken_at: Timestamp) -> Self {
        Self {
            solar_generation_w: 0.0,
            electricity_cost: 0.0,
            gas_cost: 0.0,
            free_session: false,
            saving_session: false,
            battery_level: None,
            battery_power: None,
            taken_at,
        }
    }
}

/// Overall energy status exposed to the read interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyStatus {
    pub solar_generation: f64,
    pub electricity_cost: f64,
    pub gas_cost: f64,
    pub is_free_session: bool,
    pub is_saving_session: bool,
    pub automation_enabled: bool,
    pub managed_device_count: usize,
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time;

    #[test]
    fn should_build_neutral_snapshot() {
        let snapshot = Conditions::neutral(time::now());
        assert_eq!(snapshot.solar_generation_w, 0.0);
        assert_eq!(snapshot.electricity_cost, 0.0);
        assert!(!snapshot.free_session);
        assert!(!snapshot.saving_session);
        assert!(snapshot.battery_level.is_none());
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let mut snapshot = Conditions::neutral(time::now());
        snapshot.solar_generation_w = 1500.0;
        snapshot.battery_level = Some(80.0);
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Conditions = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.solar_generation_w, 1500.0);
        assert_eq!(parsed.battery_level, Some(80.0));
    }
}
