//! # wattwise-domain
//!
//! Pure domain model for the wattwise home energy controller.
//!
//! ## Responsibilities
//! - Foundational types: entity identifiers, error conventions, timestamps
//! - Define **ManagedDevice** (control parameters for one switchable load)
//!   and its eligibility gate (schedule window + direct-control permission)
//! - Define **Conditions** (the per-tick energy signal snapshot)
//! - Define **ControlAction** (a decided on/off command with its reason)
//! - Device classification (heating vs. other) for the debounce rule
//! - Forecast slot search (best windows by solar yield or cost)
//! - Heat-pump efficiency math (COP/EER, heating cost comparison)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod action;
pub mod classify;
pub mod conditions;
pub mod device;
pub mod efficiency;
pub mod forecast;
pub mod state;
