//! Platform entity identifiers.
//!
//! The platform addresses everything by a stable string id of the form
//! `domain.object` (e.g. `switch.washer`, `sensor.solar_power`). The domain
//! prefix doubles as the service-call routing key, so it is validated at
//! construction time rather than re-parsed at every call site.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier of a platform entity (`domain.object`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Parse and validate an entity id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyEntityId`] for an empty string and
    /// [`ValidationError::MalformedEntityId`] when the `domain.object`
    /// shape is missing.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyEntityId);
        }
        match id.split_once('.') {
            Some((domain, object)) if !domain.is_empty() && !object.is_empty() => Ok(Self(id)),
            _ => Err(ValidationError::MalformedEntityId(id)),
        }
    }

    /// The platform domain prefix (`switch` in `switch.washer`).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('.').map_or("", |(domain, _)| domain)
    }

    /// The raw string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id with `.` replaced by `_`, usable as a sensor-name suffix.
    #[must_use]
    pub fn as_suffix(&self) -> String {
        self.0.replace('.', "_")
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntityId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.0
    }
}
