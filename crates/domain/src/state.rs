//! Platform state snapshots.
//!
//! The on/off state of a device always lives on the platform; these types
//! carry what a fresh read returned. They are also used in the outgoing
//! direction when the controller publishes decision records and device
//! config snapshots back to the platform.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// A single entity state as read from (or written to) the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub state: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl StateSnapshot {
    /// Build a snapshot with just a state string.
    #[must_use]
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Attach an attribute, builder-style.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Whether the platform reports the entity as switched on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        matches!(self.state.as_str(), "on" | "true")
    }

    /// Whether the platform reports the entity as switched off.
    #[must_use]
    pub fn is_off(&self) -> bool {
        matches!(self.state.as_str(), "off" | "false")
    }

    /// Whether the state is one of the "session active" indicator values.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state.as_str(), "on" | "true" | "active")
    }

    /// The `friendly_name` attribute, when present and a string.
    #[must_use]
    pub fn friendly_name(&self) -> Option<&str> {
        self.attributes.get("friendly_name").and_then(|v| v.as_str())
    }
}

/// A controllable entity discovered on the platform, offered to the user
/// for registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredEntity {
    pub entity_id: EntityId,
    pub name: String,
    pub state: String,
    pub domain: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_treat_on_and_true_as_on() {
        assert!(StateSnapshot::new("on").is_on());
        assert!(StateSnapshot::new("true").is_on());
        assert!(!StateSnapshot::new("off").is_on());
    }

    #[test]
    fn should_treat_off_and_false_as_off() {
        assert!(StateSnapshot::new("off").is_off());
        assert!(StateSnapshot::new("false").is_off());
        assert!(!StateSnapshot::new("on").is_off());
    }

    #[test]
    fn should_not_treat_unavailable_as_on_or_off() {
        let snapshot = StateSnapshot::new("unavailable");
        assert!(!snapshot.is_on());
        assert!(!snapshot.is_off());
    }

    #[test]
    fn should_treat_active_as_session_indicator_only() {
        let snapshot = StateSnapshot::new("active");
        assert!(snapshot.is_active());
        assert!(!snapshot.is_on());
    }

    #[test]
    fn should_expose_friendly_name_attribute() {
        let snapshot =
            StateSnapshot::new("on").with_attribute("friendly_name", serde_json::json!("Washer"));
        assert_eq!(snapshot.friendly_name(), Some("Washer"));
    }

    #[test]
    fn should_default_attributes_when_missing_in_json() {
        let snapshot: StateSnapshot = serde_json::from_str("{\"state\":\"on\"}").unwrap();
        assert!(snapshot.attributes.is_empty());
    }
}
