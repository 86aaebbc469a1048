//! Control engine — decides which devices to switch this tick.
//!
//! The engine is a state machine over three mutually exclusive modes,
//! evaluated in strict priority order: saving session, free session, then
//! threshold-based smart control. At most one mode emits actions per tick.
//!
//! The eligibility gate is applied only in smart-control mode. Saving and
//! free sessions bypass it deliberately: urgent load shedding (and its
//! mirror image, soaking up free energy) must win over scheduling, while
//! routine optimization respects it.

use wattwise_domain::action::{ControlAction, ControlReason, SwitchCommand};
use wattwise_domain::conditions::Conditions;
use wattwise_domain::device::ManagedDevice;
use wattwise_domain::id::EntityId;
use wattwise_domain::state::StateSnapshot;
use wattwise_domain::time::Timestamp;

use crate::ports::Platform;

/// Solar generation above which surplus devices are switched on, in watts.
pub const SOLAR_EXCESS_THRESHOLD_W: f64 = 1000.0;

/// Electricity cost above which low-priority devices are shed, per kWh.
pub const HIGH_COST_THRESHOLD: f64 = 0.30;

/// Devices with a priority above this are shed during saving sessions.
pub const SAVING_PRIORITY_CUTOFF: u8 = 3;

/// Devices with a priority above this are shed on high cost.
pub const HIGH_COST_PRIORITY_CUTOFF: u8 = 5;

/// The prioritized decision algorithm.
///
/// Holds no state of its own; device on/off state is read fresh from the
/// platform during selection, never cached.
pub struct ControlEngine<P> {
    platform: P,
}

impl<P: Platform> ControlEngine<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Compute this tick's actions.
    ///
    /// Devices are processed in ascending priority order (id as tie-break)
    /// in every mode, so the emitted order is deterministic and doubles as
    /// the application order. A device whose platform state cannot be read
    /// is skipped for this tick.
    pub async fn decide(
        &self,
        conditions: &Conditions,
        mut devices: Vec<(EntityId, ManagedDevice)>,
        now: Timestamp,
    ) -> Vec<ControlAction> {
        devices.sort_by(|a, b| (a.1.priority, &a.0).cmp(&(b.1.priority, &b.0)));

        if conditions.saving_session {
            return self.decide_saving_session(&devices).await;
        }
        if conditions.free_session {
            return self.decide_free_session(&devices).await;
        }
        self.decide_smart_control(conditions, &devices, now).await
    }

    /// Saving session: shed everything non-essential that is currently on.
    /// No gate check — load shedding overrides scheduling.
    async fn decide_saving_session(
        &self,
        devices: &[(EntityId, ManagedDevice)],
    ) -> Vec<ControlAction> {
        tracing::info!("saving session active, shedding non-essential devices");
        let mut actions = Vec::new();
        for (id, device) in devices {
            if !device.enabled || device.priority <= SAVING_PRIORITY_CUTOFF {
                continue;
            }
            if self.reads_on(id).await {
                actions.push(ControlAction::new(
                    id.clone(),
                    SwitchCommand::Off,
                    ControlReason::SavingSession,
                ));
            }
        }
        actions
    }

    /// Free session: switch on every enabled device that is currently off.
    /// No priority filter, no gate check.
    async fn decide_free_session(
        &self,
        devices: &[(EntityId, ManagedDevice)],
    ) -> Vec<ControlAction> {
        tracing::info!("free electricity session active, enabling devices");
        let mut actions = Vec::new();
        for (id, device) in devices {
            if !device.enabled {
                continue;
            }
            if self.reads_off(id).await {
                actions.push(ControlAction::new(
                    id.clone(),
                    SwitchCommand::On,
                    ControlReason::FreeSession,
                ));
            }
        }
        actions
    }

    /// Smart control: two threshold rules, at most one fires per tick.
    /// Both honor the eligibility gate.
    async fn decide_smart_control(
        &self,
        conditions: &Conditions,
        devices: &[(EntityId, ManagedDevice)],
        now: Timestamp,
    ) -> Vec<ControlAction> {
        let mut actions = Vec::new();

        if conditions.solar_generation_w > SOLAR_EXCESS_THRESHOLD_W {
            tracing::info!(
                solar_w = conditions.solar_generation_w,
                "solar excess, enabling devices"
            );
            for (id, device) in devices {
                if !device.enabled || !device.may_control(now) {
                    continue;
                }
                if self.reads_off(id).await {
                    actions.push(ControlAction::new(
                        id.clone(),
                        SwitchCommand::On,
                        ControlReason::SolarExcess,
                    ));
                }
            }
        } else if conditions.electricity_cost > HIGH_COST_THRESHOLD {
            tracing::info!(
                cost = conditions.electricity_cost,
                "high electricity cost, shedding low-priority devices"
            );
            for (id, device) in devices {
                if !device.enabled
                    || device.priority <= HIGH_COST_PRIORITY_CUTOFF
                    || !device.may_control(now)
                {
                    continue;
                }
                if self.reads_on(id).await {
                    actions.push(ControlAction::new(
                        id.clone(),
                        SwitchCommand::Off,
                        ControlReason::HighCost,
                    ));
                }
            }
        }

        actions
    }

    async fn reads_on(&self, id: &EntityId) -> bool {
        self.state_of(id).await.is_some_and(|state| state.is_on())
    }

    async fn reads_off(&self, id: &EntityId) -> bool {
        self.state_of(id).await.is_some_and(|state| state.is_off())
    }

    async fn state_of(&self, id: &EntityId) -> Option<StateSnapshot> {
        match self.platform.state(id).await {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(device = %id, error = %err, "state read failed, skipping device");
                None
            }
        }
    }
}
