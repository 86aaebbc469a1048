//! Actuator — applies one decided action through the platform.
//!
//! The actuation itself is the only operation that may fail the caller;
//! everything hanging off it (timestamp bookkeeping, persistence, linked
//! automation trigger, decision record) is a post-actuation notification
//! whose failure is captured and logged but never rolls the actuation back.

use chrono::Duration;

use wattwise_domain::action::{ControlAction, SwitchCommand};
use wattwise_domain::classify::{DeviceClass, classify};
use wattwise_domain::error::WattwiseError;
use wattwise_domain::id::EntityId;
use wattwise_domain::state::StateSnapshot;
use wattwise_domain::time::Timestamp;

use crate::registry::RegistryService;
use crate::ports::{DeviceStore, Platform};

/// What happened to one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The platform command went through and bookkeeping ran.
    Applied,
    /// A heating-class device was inside its minimum change interval; the
    /// action was silently dropped. A normal negative decision, not an
    /// error.
    DebounceSkipped,
    /// The device left the registry between decision and application.
    NotManaged,
}

/// Applies approved actions and performs the heating debounce.
pub struct Actuator<'a, S, P> {
    registry: &'a RegistryService<S, P>,
    platform: P,
    min_change_interval: Duration,
}

impl<'a, S, P> Actuator<'a, S, P>
where
    S: DeviceStore,
    P: Platform,
{
    pub fn new(
        registry: &'a RegistryService<S, P>,
        platform: P,
        min_change_interval_secs: u64,
    ) -> Self {
        Self {
            registry,
            platform,
            min_change_interval: Duration::seconds(
                i64::try_from(min_change_interval_secs).unwrap_or(i64::MAX),
            ),
        }
    }

    /// Apply one action at `now`.
    ///
    /// # Errors
    ///
    /// Returns the platform error when the underlying on/off command fails;
    /// in that case nothing was mutated and nothing was published.
    #[tracing::instrument(skip(self, action), fields(device = %action.device, command = %action.command, reason = %action.reason))]
    pub async fn apply(
        &self,
        action: &ControlAction,
        now: Timestamp,
    ) -> Result<Outcome, WattwiseError> {
        let Some(device) = self.registry.get(&action.device) else {
            tracing::debug!("device no longer managed, dropping action");
            return Ok(Outcome::NotManaged);
        };

        let heating = classify(&action.device) == DeviceClass::Heating;
        if heating
            && let Some(last) = device.last_heating_change
            && now - last < self.min_change_interval
        {
            tracing::debug!(elapsed = %(now - last), "heating change interval not elapsed");
            return Ok(Outcome::DebounceSkipped);
        }

        match action.command {
            SwitchCommand::On => self.platform.turn_on(&action.device).await?,
            SwitchCommand::Off => self.platform.turn_off(&action.device).await?,
        }
        tracing::info!("device switched");

        self.registry.mark_controlled(&action.device, heating, now).await;

        if action.command == SwitchCommand::On
            && let Some(automation) = &device.auto_start_automation
        {
            self.trigger_automation(automation).await;
        }

        self.publish_decision(action, now).await;

        Ok(Outcome::Applied)
    }

    /// Best-effort: a failed trigger is logged, never propagated, and does
    /// not roll back the actuation.
    async fn trigger_automation(&self, automation: &EntityId) {
        let payload = serde_json::json!({ "entity_id": automation.as_str() });
        match self.platform.call_service("automation", "trigger", payload).await {
            Ok(()) => tracing::info!(automation = %automation, "triggered linked automation"),
            Err(err) => {
                tracing::warn!(automation = %automation, error = %err, "automation trigger failed");
            }
        }
    }

    /// Publish a human-readable decision record, independently non-fatal.
    async fn publish_decision(&self, action: &ControlAction, now: Timestamp) {
        let Ok(sensor) = EntityId::new(format!("sensor.sec_{}", action.device.as_suffix())) else {
            return;
        };
        let snapshot = StateSnapshot::new(action.command.to_string())
            .with_attribute("entity_id", serde_json::json!(action.device.as_str()))
            .with_attribute("reason", serde_json::json!(action.reason.as_str()))
            .with_attribute("controlled_at", serde_json::json!(now.to_rfc3339()));
        if let Err(err) = self.platform.publish_state(&sensor, snapshot).await {
            tracing::warn!(error = %err, "publishing decision record failed");
        }
    }
}
