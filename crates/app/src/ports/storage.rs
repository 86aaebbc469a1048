//! Storage port — wholesale persistence of the registry document.
//!
//! The registry is a single document mapping device id to its control
//! parameters, read once at startup and rewritten completely after every
//! mutation. There is no partial update and no transactional coupling with
//! the in-memory copy.

use std::collections::HashMap;
use std::future::Future;

use wattwise_domain::device::ManagedDevice;
use wattwise_domain::error::WattwiseError;
use wattwise_domain::id::EntityId;

/// The persisted registry document.
pub type DeviceDocument = HashMap<EntityId, ManagedDevice>;

/// Loads and saves the managed-device document.
pub trait DeviceStore {
    /// Load the document. An absent document is an empty registry, not an
    /// error.
    fn load(&self) -> impl Future<Output = Result<DeviceDocument, WattwiseError>> + Send;

    /// Rewrite the document wholesale.
    fn save(
        &self,
        devices: &DeviceDocument,
    ) -> impl Future<Output = Result<(), WattwiseError>> + Send;
}

impl<T: DeviceStore + Send + Sync> DeviceStore for std::sync::Arc<T> {
    fn load(&self) -> impl Future<Output = Result<DeviceDocument, WattwiseError>> + Send {
        (**self).load()
    }

    fn save(
        &self,
        devices: &DeviceDocument,
    ) -> impl Future<Output = Result<(), WattwiseError>> + Send {
        (**self).save(devices)
    }
}
