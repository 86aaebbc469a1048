//! Managed device — control parameters for one switchable load.
//!
//! A [`ManagedDevice`] holds everything the controller needs to decide
//! whether and when it may act on a device: priority, schedule window,
//! direct-control permission, and the timestamps driving the heating
//! debounce. The on/off state itself is never stored here — it always
//! lives on the platform and is fetched fresh each evaluation.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, WattwiseError};
use crate::id::EntityId;
use crate::time::{self, Timestamp};

/// Default priority for newly registered devices (mid-range).
pub const DEFAULT_PRIORITY: u8 = 5;

/// An allowed control window: time-of-day range plus a weekday set.
///
/// Times are zero-padded `HH:MM` strings compared lexicographically, which
/// is equivalent to chronological order within one day. Windows crossing
/// midnight (`start > end`) are not supported: such a window never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub start: String,
    pub end: String,
    /// Allowed weekdays, Monday = 0 through Sunday = 6. Empty means any day.
    #[serde(default)]
    pub days: Vec<u8>,
}

impl Schedule {
    /// Check schedule invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedScheduleTime`] for times that are
    /// not zero-padded `HH:MM`, or [`ValidationError::WeekdayOutOfRange`]
    /// for day indices above 6.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for raw in [&self.start, &self.end] {
            if !is_hh_mm(raw) {
                return Err(ValidationError::MalformedScheduleTime(raw.clone()));
            }
        }
        if let Some(day) = self.days.iter().find(|day| **day > 6) {
            return Err(ValidationError::WeekdayOutOfRange(*day));
        }
        Ok(())
    }

    /// Whether `now` falls inside this window.
    ///
    /// The weekday set is only consulted when non-empty; the time range is
    /// inclusive on both ends.
    #[must_use]
    pub fn allows(&self, now: Timestamp) -> bool {
        if !self.days.is_empty() && !self.days.contains(&time::weekday_index(now)) {
            return false;
        }
        let tod = time::time_of_day(now);
        self.start <= tod && tod <= self.end
    }
}

fn is_hh_mm(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit()
}

/// Control parameters for one device under energy management.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagedDevice {
    /// Lower value = more important; important devices are considered first.
    pub priority: u8,
    /// Rated consumption in watts. Informational, not enforced as a budget.
    #[serde(default)]
    pub power_consumption: f64,
    pub enabled: bool,
    /// When false the controller never actuates this device.
    pub allow_direct_control: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    /// Automation to trigger after a successful turn-on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_start_automation: Option<EntityId>,
    /// Minutes needed for a full duty cycle; drives the slot search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_run_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_controlled: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_heating_change: Option<Timestamp>,
}

impl Default for ManagedDevice {
    fn default() -> Self {
        Self {
            priority: DEFAULT_PRIORITY,
            power_consumption: 0.0,
            enabled: true,
            allow_direct_control: true,
            schedule: None,
            auto_start_automation: None,
            required_run_duration: None,
            last_controlled: None,
            last_heating_change: None,
        }
    }
}

impl ManagedDevice {
    /// Create a builder for constructing a [`ManagedDevice`].
    #[must_use]
    pub fn builder() -> ManagedDeviceBuilder {
        ManagedDeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WattwiseError::Validation`] when the schedule is malformed.
    pub fn validate(&self) -> Result<(), WattwiseError> {
        if let Some(schedule) = &self.schedule {
            schedule.validate()?;
        }
        Ok(())
    }

    /// The eligibility gate: may the controller actuate this device at
    /// `now`?
    ///
    /// Combines the direct-control permission and the schedule window. The
    /// heating debounce is deliberately *not* part of the gate — it depends
    /// on the actuation itself and is checked when an action is applied.
    #[must_use]
    pub fn may_control(&self, now: Timestamp) -> bool {
        if !self.allow_direct_control {
            return false;
        }
        match &self.schedule {
            Some(schedule) => schedule.allows(now),
            None => true,
        }
    }
}

/// Step-by-step builder for [`ManagedDevice`].
#[derive(Debug, Default)]
pub struct ManagedDeviceBuilder {
    priority: Option<u8>,
    power_consumption: Option<f64>,
    enabled: Option<bool>,
    allow_direct_control: Option<bool>,
    schedule: Option<Schedule>,
    auto_start_automation: Option<EntityId>,
    required_run_duration: Option<u32>,
}

impl ManagedDeviceBuilder {
    #[must_use]
    pub fn priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn power_consumption(mut self, watts: f64) -> Self {
        self.power_consumption = Some(watts);
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn allow_direct_control(mut self, allow: bool) -> Self {
        self.allow_direct_control = Some(allow);
        self
    }

    #[must_use]
    pub fn schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    #[must_use]
    pub fn auto_start_automation(mut self, automation: EntityId) -> Self {
        self.auto_start_automation = Some(automation);
        self
    }

    #[must_use]
    pub fn required_run_duration(mut self, minutes: u32) -> Self {
        self.required_run_duration = Some(minutes);
        self
    }

    /// Consume the builder, validate, and return a [`ManagedDevice`].
    ///
    /// # Errors
    ///
    /// Returns [`WattwiseError::Validation`] when the schedule is malformed.
    pub fn build(self) -> Result<ManagedDevice, WattwiseError> {
        let device = ManagedDevice {
            priority: self.priority.unwrap_or(DEFAULT_PRIORITY),
            power_consumption: self.power_consumption.unwrap_or(0.0),
            enabled: self.enabled.unwrap_or(true),
            allow_direct_control: self.allow_direct_control.unwrap_or(true),
            schedule: self.schedule,
            auto_start_automation: self.auto_start_automation,
            required_run_duration: self.required_run_duration,
            last_controlled: None,
            last_heating_change: None,
        };
        device.validate()?;
        Ok(device)
    }
}
