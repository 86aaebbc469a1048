//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`WattwiseError`] via `#[from]` — no stringly-typed variants at the top
//! level.

use std::fmt;

/// Top-level error type shared across the workspace.
#[derive(Debug, thiserror::Error)]
pub enum WattwiseError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("storage error")]
    Storage(#[from] StorageError),

    #[error("platform error")]
    Platform(#[from] PlatformError),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("entity id must not be empty")]
    EmptyEntityId,

    #[error("entity id must be of the form `domain.object`: {0}")]
    MalformedEntityId(String),

    #[error("schedule time must be zero-padded HH:MM: {0}")]
    MalformedScheduleTime(String),

    #[error("schedule weekday out of range (0..=6): {0}")]
    WeekdayOutOfRange(u8),
}

/// A lookup that found nothing.
#[derive(Debug, thiserror::Error)]
pub struct NotFoundError {
    /// Kind of thing that was looked up (e.g. `"Device"`).
    pub entity: &'static str,
    /// The identifier that missed.
    pub id: String,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} not found: {}", self.entity, self.id)
    }
}

/// Failures talking to the registry document store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("io error")]
    Io(#[from] std::io::Error),

    #[error("serialization error")]
    Serialization(#[from] serde_json::Error),
}

/// Failures talking to the state/automation platform.
///
/// Kept free of transport types so the domain and app crates never depend
/// on an HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("platform request failed: {0}")]
    Request(String),

    #[error("platform returned status {0}")]
    Status(u16),

    #[error("platform response could not be decoded: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_top_level() {
        let err: WattwiseError = ValidationError::EmptyEntityId.into();
        assert!(matches!(err, WattwiseError::Validation(_)));
    }

    #[test]
    fn should_render_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Device",
            id: "switch.washer".to_string(),
        };
        assert_eq!(err.to_string(), "Device not found: switch.washer");
    }

    #[test]
    fn should_convert_io_error_into_storage_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: WattwiseError = StorageError::from(io).into();
        assert!(matches!(err, WattwiseError::Storage(StorageError::Io(_))));
    }
}
