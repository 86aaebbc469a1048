//! Platform port — the state/automation provider behind the controller.
//!
//! Everything the controller knows about the outside world (sensor
//! readings, device states) and everything it does to it (on/off commands,
//! automation triggers, decision records) goes through this trait.

use std::future::Future;

use wattwise_domain::error::WattwiseError;
use wattwise_domain::id::EntityId;
use wattwise_domain::state::{DiscoveredEntity, StateSnapshot};

/// Client for the external state/automation platform.
pub trait Platform {
    /// Read one entity's state. `Ok(None)` means the entity is unknown to
    /// the platform.
    fn state(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<Option<StateSnapshot>, WattwiseError>> + Send;

    /// Read a sensor's state parsed as a number.
    fn sensor_value(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<f64, WattwiseError>> + Send;

    /// Switch an entity on, routed by the id's domain prefix.
    fn turn_on(&self, id: &EntityId) -> impl Future<Output = Result<(), WattwiseError>> + Send;

    /// Switch an entity off, routed by the id's domain prefix.
    fn turn_off(&self, id: &EntityId) -> impl Future<Output = Result<(), WattwiseError>> + Send;

    /// Invoke an arbitrary platform service (used to trigger linked
    /// automations).
    fn call_service(
        &self,
        domain: &str,
        service: &str,
        payload: serde_json::Value,
    ) -> impl Future<Output = Result<(), WattwiseError>> + Send;

    /// Publish a state snapshot back to the platform (decision records,
    /// device config snapshots).
    fn publish_state(
        &self,
        id: &EntityId,
        snapshot: StateSnapshot,
    ) -> impl Future<Output = Result<(), WattwiseError>> + Send;

    /// List the platform's controllable entities (switches, lights, ...).
    fn controllable_entities(
        &self,
    ) -> impl Future<Output = Result<Vec<DiscoveredEntity>, WattwiseError>> + Send;
}

impl<T: Platform + Send + Sync> Platform for std::sync::Arc<T> {
    fn state(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<Option<StateSnapshot>, WattwiseError>> + Send {
        (**self).state(id)
    }

    fn sensor_value(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<f64, WattwiseError>> + Send {
        (**self).sensor_value(id)
    }

    fn turn_on(&self, id: &EntityId) -> impl Future<Output = Result<(), WattwiseError>> + Send {
        (**self).turn_on(id)
    }

    fn turn_off(&self, id: &EntityId) -> impl Future<Output = Result<(), WattwiseError>> + Send {
        (**self).turn_off(id)
    }

    fn call_service(
        &self,
        domain: &str,
        service: &str,
        payload: serde_json::Value,
    ) -> impl Future<Output = Result<(), WattwiseError>> + Send {
        (**self).call_service(domain, service, payload)
    }

    fn publish_state(
        &self,
        id: &EntityId,
        snapshot: StateSnapshot,
    ) -> impl Future<Output = Result<(), WattwiseError>> + Send {
        (**self).publish_state(id, snapshot)
    }

    fn controllable_entities(
        &self,
    ) -> impl Future<Output = Result<Vec<DiscoveredEntity>, WattwiseError>> + Send {
        (**self).controllable_entities()
    }
}
