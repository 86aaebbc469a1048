//! Control actions — the decision engine's output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// Direction of an actuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchCommand {
    On,
    Off,
}

impl fmt::Display for SwitchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// Why an action was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlReason {
    SavingSession,
    FreeSession,
    SolarExcess,
    HighCost,
}

impl ControlReason {
    /// The wire string used in decision records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SavingSession => "saving_session",
            Self::FreeSession => "free_session",
            Self::SolarExcess => "solar_excess",
            Self::HighCost => "high_cost",
        }
    }
}

impl fmt::Display for ControlReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decided on/off command for one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlAction {
    pub device: EntityId,
    pub command: SwitchCommand,
    pub reason: ControlReason,
}

impl ControlAction {
    #[must_use]
    pub fn new(device: EntityId, command: SwitchCommand, reason: ControlReason) -> Self {
        Self {
            device,
            command,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_reason_as_snake_case() {
        let json = serde_json::to_string(&ControlReason::SolarExcess).unwrap();
        assert_eq!(json, "\"solar_excess\"");
    }

    #[test]
    fn should_display_reason_wire_string() {
        assert_eq!(ControlReason::SavingSession.to_string(), "saving_session");
        assert_eq!(ControlReason::HighCost.to_string(), "high_cost");
    }

    #[test]
    fn should_display_command_lowercase() {
        assert_eq!(SwitchCommand::On.to_string(), "on");
        assert_eq!(SwitchCommand::Off.to_string(), "off");
    }

    #[test]
    fn should_roundtrip_action_through_serde_json() {
        let action = ControlAction::new(
            EntityId::new("switch.washer").unwrap(),
            SwitchCommand::Off,
            ControlReason::HighCost,
        );
        let json = serde_json::to_string(&action).unwrap();
        let parsed: ControlAction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, action);
    }
}
