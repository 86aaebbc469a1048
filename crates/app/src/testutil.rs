//! Shared in-memory fakes for the port traits, used across unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use wattwise_domain::action::SwitchCommand;
use wattwise_domain::error::{PlatformError, StorageError, WattwiseError};
use wattwise_domain::id::EntityId;
use wattwise_domain::state::{DiscoveredEntity, StateSnapshot};

use crate::ports::storage::DeviceDocument;
use crate::ports::{DeviceStore, Platform};

/// Scriptable platform fake that records every outgoing call.
#[derive(Default)]
pub struct FakePlatform {
    states: Mutex<HashMap<EntityId, StateSnapshot>>,
    numbers: Mutex<HashMap<EntityId, f64>>,
    commands: Mutex<Vec<(EntityId, SwitchCommand)>>,
    service_calls: Mutex<Vec<(String, String, serde_json::Value)>>,
    published: Mutex<Vec<(EntityId, StateSnapshot)>>,
    failing_commands: Mutex<HashSet<EntityId>>,
    fail_state_reads: AtomicBool,
    fail_service_calls: AtomicBool,
    fail_publish: AtomicBool,
}

impl FakePlatform {
    pub fn set_state(&self, id: &str, state: &str) {
        self.set_snapshot(id, StateSnapshot::new(state));
    }

    pub fn set_snapshot(&self, id: &str, snapshot: StateSnapshot) {
        self.states
            .lock()
            .unwrap()
            .insert(EntityId::new(id).unwrap(), snapshot);
    }

    pub fn set_number(&self, id: &str, value: f64) {
        self.numbers
            .lock()
            .unwrap()
            .insert(EntityId::new(id).unwrap(), value);
    }

    pub fn fail_commands_for(&self, id: &str) {
        self.failing_commands
            .lock()
            .unwrap()
            .insert(EntityId::new(id).unwrap());
    }

    pub fn fail_state_reads(&self, fail: bool) {
        self.fail_state_reads.store(fail, Ordering::Relaxed);
    }

    pub fn fail_service_calls(&self, fail: bool) {
        self.fail_service_calls.store(fail, Ordering::Relaxed);
    }

    pub fn fail_publish(&self, fail: bool) {
        self.fail_publish.store(fail, Ordering::Relaxed);
    }

    pub fn commands(&self) -> Vec<(EntityId, SwitchCommand)> {
        self.commands.lock().unwrap().clone()
    }

    pub fn service_calls(&self) -> Vec<(String, String, serde_json::Value)> {
        self.service_calls.lock().unwrap().clone()
    }

    pub fn published(&self) -> Vec<(EntityId, StateSnapshot)> {
        self.published.lock().unwrap().clone()
    }

    fn command(&self, id: &EntityId, command: SwitchCommand) -> Result<(), WattwiseError> {
        if self.failing_commands.lock().unwrap().contains(id) {
            return Err(PlatformError::Status(500).into());
        }
        self.commands.lock().unwrap().push((id.clone(), command));
        // Mirror the state change so follow-up reads see the new state.
        self.states
            .lock()
            .unwrap()
            .insert(id.clone(), StateSnapshot::new(command.to_string()));
        Ok(())
    }
}

impl Platform for FakePlatform {
    async fn state(&self, id: &EntityId) -> Result<Option<StateSnapshot>, WattwiseError> {
        if self.fail_state_reads.load(Ordering::Relaxed) {
            return Err(PlatformError::Request("state read failed".to_string()).into());
        }
        Ok(self.states.lock().unwrap().get(id).cloned())
    }

    async fn sensor_value(&self, id: &EntityId) -> Result<f64, WattwiseError> {
        if self.fail_state_reads.load(Ordering::Relaxed) {
            return Err(PlatformError::Request("sensor read failed".to_string()).into());
        }
        self.numbers
            .lock()
            .unwrap()
            .get(id)
            .copied()
            .ok_or_else(|| PlatformError::Request(format!("no such sensor: {id}")).into())
    }

    async fn turn_on(&self, id: &EntityId) -> Result<(), WattwiseError> {
        self.command(id, SwitchCommand::On)
    }

    async fn turn_off(&self, id: &EntityId) -> Result<(), WattwiseError> {
        self.command(id, SwitchCommand::Off)
    }

    async fn call_service(
        &self,
        domain: &str,
        service: &str,
        payload: serde_json::Value,
    ) -> Result<(), WattwiseError> {
        if self.fail_service_calls.load(Ordering::Relaxed) {
            return Err(PlatformError::Status(500).into());
        }
        self.service_calls
            .lock()
            .unwrap()
            .push((domain.to_string(), service.to_string(), payload));
        Ok(())
    }

    async fn publish_state(
        &self,
        id: &EntityId,
        snapshot: StateSnapshot,
    ) -> Result<(), WattwiseError> {
        if self.fail_publish.load(Ordering::Relaxed) {
            return Err(PlatformError::Status(500).into());
        }
        self.published.lock().unwrap().push((id.clone(), snapshot));
        Ok(())
    }

    async fn controllable_entities(&self) -> Result<Vec<DiscoveredEntity>, WattwiseError> {
        Ok(Vec::new())
    }
}

/// In-memory device store with scriptable save failures.
#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<DeviceDocument>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn document(&self) -> DeviceDocument {
        self.document.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::Relaxed);
    }
}

impl DeviceStore for MemoryStore {
    async fn load(&self) -> Result<DeviceDocument, WattwiseError> {
        Ok(self.document())
    }

    async fn save(&self, devices: &DeviceDocument) -> Result<(), WattwiseError> {
        if self.fail_saves.load(Ordering::Relaxed) {
            return Err(StorageError::Io(std::io::Error::other("disk full")).into());
        }
        *self.document.lock().unwrap() = devices.clone();
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
