//! Device registry — the single piece of state shared between the control
//! loop and the read/write interface.
//!
//! The registry is the source of truth for *automation decisions* only.
//! Device on/off state always lives on the platform and is fetched fresh
//! per evaluation; the registry never caches it.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use wattwise_domain::device::{ManagedDevice, Schedule};
use wattwise_domain::error::{NotFoundError, WattwiseError};
use wattwise_domain::id::EntityId;
use wattwise_domain::state::StateSnapshot;
use wattwise_domain::time::Timestamp;

use crate::ports::storage::DeviceDocument;
use crate::ports::{DeviceStore, Platform};

/// Partial update for a managed device; absent fields stay unchanged.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DeviceUpdate {
    pub priority: Option<u8>,
    pub power_consumption: Option<f64>,
    pub enabled: Option<bool>,
    pub allow_direct_control: Option<bool>,
    pub schedule: Option<Schedule>,
    pub auto_start_automation: Option<EntityId>,
    pub required_run_duration: Option<u32>,
}

/// A managed device joined with its live platform state, for listing.
#[derive(Debug, Clone, Serialize)]
pub struct ManagedDeviceView {
    pub entity_id: EntityId,
    pub name: String,
    pub state: String,
    pub priority: u8,
    pub power_consumption: f64,
    pub enabled: bool,
    pub allow_direct_control: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_start_automation: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_run_duration: Option<u32>,
}

/// Lock-guarded registry of managed devices plus its persistence.
///
/// All mutations rewrite the persisted document wholesale, fire-and-forget:
/// a save failure is logged and the in-memory copy stays authoritative
/// until the next successful save. The mutex is never held across an await
/// point.
pub struct RegistryService<S, P> {
    devices: Mutex<DeviceDocument>,
    store: S,
    platform: P,
}

impl<S, P> RegistryService<S, P>
where
    S: DeviceStore,
    P: Platform,
{
    /// Create an empty registry (not yet loaded).
    pub fn new(store: S, platform: P) -> Self {
        Self {
            devices: Mutex::new(DeviceDocument::new()),
            store,
            platform,
        }
    }

    /// Create a registry pre-populated from the store.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the document exists but cannot be read.
    pub async fn load(store: S, platform: P) -> Result<Self, WattwiseError> {
        let devices = store.load().await?;
        tracing::info!(count = devices.len(), "loaded managed devices");
        Ok(Self {
            devices: Mutex::new(devices),
            store,
            platform,
        })
    }

    /// Register a device (upsert: re-registering replaces the entry).
    ///
    /// # Errors
    ///
    /// Returns [`WattwiseError::Validation`] when the device is invalid.
    #[tracing::instrument(skip(self, device), fields(device = %id))]
    pub async fn register(
        &self,
        id: EntityId,
        device: ManagedDevice,
    ) -> Result<(), WattwiseError> {
        device.validate()?;
        self.lock().insert(id.clone(), device);
        tracing::info!("added device to energy management");
        self.persist().await;
        self.publish_device_snapshot(&id).await;
        Ok(())
    }

    /// Apply a partial update to an existing device.
    ///
    /// # Errors
    ///
    /// Returns [`WattwiseError::NotFound`] when the id is not registered,
    /// or a validation error when the patched device is invalid.
    #[tracing::instrument(skip(self, update), fields(device = %id))]
    pub async fn update(&self, id: &EntityId, update: DeviceUpdate) -> Result<(), WattwiseError> {
        {
            let mut devices = self.lock();
            let device = devices.get_mut(id).ok_or_else(|| NotFoundError {
                entity: "Device",
                id: id.to_string(),
            })?;

            let mut patched = device.clone();
            if let Some(priority) = update.priority {
                patched.priority = priority;
            }
            if let Some(watts) = update.power_consumption {
                patched.power_consumption = watts;
            }
            if let Some(enabled) = update.enabled {
                patched.enabled = enabled;
            }
            if let Some(allow) = update.allow_direct_control {
                patched.allow_direct_control = allow;
            }
            if let Some(schedule) = update.schedule {
                patched.schedule = Some(schedule);
            }
            if let Some(automation) = update.auto_start_automation {
                patched.auto_start_automation = Some(automation);
            }
            if let Some(duration) = update.required_run_duration {
                patched.required_run_duration = Some(duration);
            }
            patched.validate()?;
            *device = patched;
        }
        self.persist().await;
        self.publish_device_snapshot(id).await;
        Ok(())
    }

    /// Remove a device. Removing an absent id is not an error.
    #[tracing::instrument(skip(self), fields(device = %id))]
    pub async fn remove(&self, id: &EntityId) {
        let removed = self.lock().remove(id).is_some();
        if removed {
            tracing::info!("removed device from energy management");
            self.persist().await;
        }
    }

    /// Fetch one device's control parameters.
    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<ManagedDevice> {
        self.lock().get(id).cloned()
    }

    /// Number of registered devices.
    #[must_use]
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Clone of the full registry for one decision pass.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(EntityId, ManagedDevice)> {
        self.lock()
            .iter()
            .map(|(id, device)| (id.clone(), device.clone()))
            .collect()
    }

    /// All managed devices joined with their live platform state.
    ///
    /// Devices whose state cannot be read right now are omitted from the
    /// listing rather than failing the whole call.
    pub async fn list_with_state(&self) -> Vec<ManagedDeviceView> {
        let mut views = Vec::new();
        for (id, device) in self.snapshot() {
            match self.platform.state(&id).await {
                Ok(Some(state)) => views.push(ManagedDeviceView {
                    name: state
                        .friendly_name()
                        .map_or_else(|| id.to_string(), ToString::to_string),
                    state: state.state,
                    entity_id: id,
                    priority: device.priority,
                    power_consumption: device.power_consumption,
                    enabled: device.enabled,
                    allow_direct_control: device.allow_direct_control,
                    schedule: device.schedule,
                    auto_start_automation: device.auto_start_automation,
                    required_run_duration: device.required_run_duration,
                }),
                Ok(None) => {
                    tracing::debug!(device = %id, "managed device unknown to platform");
                }
                Err(err) => {
                    tracing::warn!(device = %id, error = %err, "state read failed");
                }
            }
        }
        views.sort_by(|a, b| (a.priority, &a.entity_id).cmp(&(b.priority, &b.entity_id)));
        views
    }

    /// Record a successful actuation, then persist.
    pub async fn mark_controlled(&self, id: &EntityId, heating: bool, at: Timestamp) {
        {
            let mut devices = self.lock();
            let Some(device) = devices.get_mut(id) else {
                return;
            };
            device.last_controlled = Some(at);
            if heating {
                device.last_heating_change = Some(at);
            }
        }
        self.persist().await;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DeviceDocument> {
        self.devices.lock().expect("device registry lock poisoned")
    }

    /// Rewrite the persisted document. Failure is logged, never propagated:
    /// the in-memory registry stays authoritative until the next save.
    async fn persist(&self) {
        let document = self.lock().clone();
        if let Err(err) = self.store.save(&document).await {
            tracing::error!(error = %err, "saving managed devices failed");
        }
    }

    /// Surface a device's configuration back to the platform, best-effort.
    async fn publish_device_snapshot(&self, id: &EntityId) {
        let Some(device) = self.get(id) else { return };
        let Ok(sensor) = EntityId::new(format!("sensor.sec_device_{}", id.as_suffix())) else {
            return;
        };
        let snapshot = StateSnapshot::new("managed")
            .with_attribute("entity_id", serde_json::json!(id.as_str()))
            .with_attribute("priority", serde_json::json!(device.priority))
            .with_attribute("power_consumption", serde_json::json!(device.power_consumption))
            .with_attribute("enabled", serde_json::json!(device.enabled))
            .with_attribute(
                "allow_direct_control",
                serde_json::json!(device.allow_direct_control),
            );
        if let Err(err) = self.platform.publish_state(&sensor, snapshot).await {
            tracing::warn!(device = %id, error = %err, "publishing device snapshot failed");
        }
    }
}
