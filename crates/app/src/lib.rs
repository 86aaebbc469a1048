//! # wattwise-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound):
//!   - `Platform` — state reads, on/off commands, service calls
//!   - `DeviceStore` — wholesale load/save of the registry document
//! - Provide the control subsystem:
//!   - `ConditionReader` — per-tick energy signal snapshot
//!   - `ControlEngine` — the prioritized decision algorithm
//!   - `Actuator` — applies decided actions, heating debounce included
//!   - `ControlLoop` — drives the above on a fixed cadence
//! - Provide `RegistryService` (managed-device CRUD + persistence) and
//!   `ForecastService` (forecast series + optimal run windows)
//!
//! ## Dependency rule
//! Depends on `wattwise-domain` only (plus `tokio` for time/sync).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod actuator;
pub mod automation_switch;
pub mod conditions;
pub mod config;
pub mod control_loop;
pub mod engine;
pub mod forecast_service;
pub mod ports;
pub mod registry;

#[cfg(test)]
pub(crate) mod testutil;
