//! # wattwise-adapter-storage-json
//!
//! Persistence adapter for the device registry: one pretty-printed JSON
//! document at a configurable path, read once at startup and rewritten
//! wholesale after every mutation.
//!
//! ## Dependency rule
//! Depends on `wattwise-app` (port traits) and `wattwise-domain` only.

use std::path::PathBuf;

use wattwise_app::ports::DeviceStore;
use wattwise_app::ports::storage::DeviceDocument;
use wattwise_domain::error::{StorageError, WattwiseError};

/// File-backed [`DeviceStore`].
#[derive(Debug, Clone)]
pub struct JsonDeviceStore {
    path: PathBuf,
}

impl JsonDeviceStore {
    /// Create a store persisting to `path`. The file does not need to
    /// exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DeviceStore for JsonDeviceStore {
    async fn load(&self) -> Result<DeviceDocument, WattwiseError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no registry document yet");
                return Ok(DeviceDocument::new());
            }
            Err(err) => return Err(StorageError::Io(err).into()),
        };
        let document = serde_json::from_slice(&raw).map_err(StorageError::Serialization)?;
        Ok(document)
    }

    async fn save(&self, devices: &DeviceDocument) -> Result<(), WattwiseError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(StorageError::Io)?;
        }
        let raw = serde_json::to_vec_pretty(devices).map_err(StorageError::Serialization)?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(StorageError::Io)?;
        Ok(())
    }
}
