//! Global automation enablement shared between the control loop and the
//! HTTP interface.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use wattwise_domain::time::Timestamp;

/// On/off switch for the whole control subsystem.
///
/// Disabling only suppresses the *next* tick's decision phase; it does not
/// abort actuation already in flight.
#[derive(Debug)]
pub struct AutomationSwitch {
    enabled: AtomicBool,
    last_run: Mutex<Option<Timestamp>>,
}

/// Status payload for the automation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AutomationStatus {
    pub enabled: bool,
    pub last_run: Option<Timestamp>,
}

impl AutomationSwitch {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            last_run: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        tracing::info!(enabled, "automation toggled");
    }

    /// Record that a tick just evaluated.
    pub fn mark_run(&self, at: Timestamp) {
        *self.last_run.lock().expect("automation switch lock poisoned") = Some(at);
    }

    #[must_use]
    pub fn status(&self) -> AutomationStatus {
        AutomationStatus {
            enabled: self.is_enabled(),
            last_run: *self.last_run.lock().expect("automation switch lock poisoned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wattwise_domain::time;

    #[test]
    fn should_start_with_configured_state() {
        assert!(AutomationSwitch::new(true).is_enabled());
        assert!(!AutomationSwitch::new(false).is_enabled());
    }

    #[test]
    fn should_toggle() {
        let switch = AutomationSwitch::new(true);
        switch.set_enabled(false);
        assert!(!switch.is_enabled());
        switch.set_enabled(true);
        assert!(switch.is_enabled());
    }

    #[test]
    fn should_report_last_run_after_marking() {
        let switch = AutomationSwitch::new(true);
        assert!(switch.status().last_run.is_none());

        let ts = time::now();
        switch.mark_run(ts);
        assert_eq!(switch.status().last_run, Some(ts));
    }
}
