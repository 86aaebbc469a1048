//! # wattwise-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the controller's **REST JSON API**: available and managed
//!   devices, energy status, heating comparison, automation toggle,
//!   forecasts, and per-device optimal schedules
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application errors into HTTP responses without leaking internal
//!   detail
//!
//! ## Dependency rule
//! Depends on `wattwise-app` (for port traits and services) and
//! `wattwise-domain` (for types used in request/response mapping). Never
//! leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
