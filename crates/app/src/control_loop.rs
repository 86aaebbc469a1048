//! Control loop — drives the decision engine on a fixed cadence.

use std::sync::Arc;

use tokio::time::MissedTickBehavior;

use wattwise_domain::time;

use crate::actuator::Actuator;
use crate::automation_switch::AutomationSwitch;
use crate::conditions::ConditionReader;
use crate::config::ControlConfig;
use crate::engine::ControlEngine;
use crate::ports::{DeviceStore, Platform};
use crate::registry::RegistryService;

/// The perpetual periodic task owning on/off for the whole subsystem.
///
/// Ticks run strictly sequentially: a tick that overruns the period causes
/// the missed ticks to be skipped, never queued, so platform slowness can
/// delay control but not pile it up. No failure inside a tick terminates
/// the loop.
pub struct ControlLoop<S, P> {
    reader: ConditionReader<P>,
    engine: ControlEngine<P>,
    registry: Arc<RegistryService<S, P>>,
    platform: P,
    switch: Arc<AutomationSwitch>,
    config: ControlConfig,
}

impl<S, P> ControlLoop<S, P>
where
    S: DeviceStore,
    P: Platform + Clone,
{
    pub fn new(
        platform: P,
        registry: Arc<RegistryService<S, P>>,
        switch: Arc<AutomationSwitch>,
        reader: ConditionReader<P>,
        config: ControlConfig,
    ) -> Self {
        Self {
            reader,
            engine: ControlEngine::new(platform.clone()),
            registry,
            platform,
            switch,
            config,
        }
    }

    /// Run forever. Intended to be spawned as its own task.
    pub async fn run(self) {
        let period = std::time::Duration::from_secs(self.config.tick_seconds);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!(period_secs = self.config.tick_seconds, "control loop started");

        loop {
            interval.tick().await;
            self.evaluate().await;
        }
    }

    /// One tick: snapshot, decide, apply. Skipped entirely while the
    /// automation switch is off.
    pub async fn evaluate(&self) {
        if !self.switch.is_enabled() {
            return;
        }

        let now = time::now();
        let conditions = self.reader.snapshot().await;
        tracing::info!(
            solar_w = conditions.solar_generation_w,
            cost = conditions.electricity_cost,
            free = conditions.free_session,
            saving = conditions.saving_session,
            "evaluating control tick"
        );

        let devices = self.registry.snapshot();
        let actions = self.engine.decide(&conditions, devices, now).await;

        let actuator = Actuator::new(
            self.registry.as_ref(),
            self.platform.clone(),
            self.config.heating_min_change_interval,
        );
        for action in &actions {
            if let Err(err) = actuator.apply(action, now).await {
                tracing::error!(device = %action.device, error = %err, "actuation failed");
            }
        }

        self.switch.mark_run(now);
    }
}
