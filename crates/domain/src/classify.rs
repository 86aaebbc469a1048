//! Device classification for the debounce rule.
//!
//! Heating-class loads (heat pumps, thermostats) are rate-limited to
//! protect the equipment from rapid cycling. Classification is a substring
//! heuristic on the entity id; it lives behind this function so it can be
//! swapped for an explicit per-device flag without touching the debounce
//! logic.

use crate::id::EntityId;

/// Coarse device category used by the actuation debounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Heating,
    Other,
}

/// Classify a device by its identifier.
///
/// Case-insensitive match on a heating-indicative token ("heat" or
/// "thermostat") anywhere in the id.
#[must_use]
pub fn classify(id: &EntityId) -> DeviceClass {
    let lower = id.as_str().to_ascii_lowercase();
    if lower.contains("heat") || lower.contains("thermostat") {
        DeviceClass::Heating
    } else {
        DeviceClass::Other
    }
}
