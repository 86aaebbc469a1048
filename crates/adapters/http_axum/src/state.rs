//! Shared application state for axum handlers.

use std::sync::Arc;

use wattwise_app::automation_switch::AutomationSwitch;
use wattwise_app::conditions::ConditionReader;
use wattwise_app::config::ControlConfig;
use wattwise_app::forecast_service::ForecastService;
use wattwise_app::ports::{DeviceStore, Platform};
use wattwise_app::registry::RegistryService;

/// Application state shared across all axum handlers.
///
/// Generic over the store and platform types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do
/// not need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<S, P> {
    /// Managed-device registry (the lock-guarded shared state).
    pub registry: Arc<RegistryService<S, P>>,
    /// Per-tick condition snapshots, reused for the status endpoint.
    pub conditions: Arc<ConditionReader<P>>,
    /// Forecast series and optimal run windows.
    pub forecast: Arc<ForecastService<P>>,
    /// Direct platform access for device discovery.
    pub platform: Arc<P>,
    /// Global automation enablement.
    pub switch: Arc<AutomationSwitch>,
    /// Control tunables (COP coefficient for the heating comparison).
    pub control: ControlConfig,
}

impl<S, P> Clone for AppState<S, P> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            conditions: Arc::clone(&self.conditions),
            forecast: Arc::clone(&self.forecast),
            platform: Arc::clone(&self.platform),
            switch: Arc::clone(&self.switch),
            control: self.control.clone(),
        }
    }
}

impl<S, P> AppState<S, P>
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    /// Create a new application state from pre-wrapped `Arc` components.
    ///
    /// The components are shared with the control loop, so they arrive
    /// already wrapped.
    pub fn new(
        registry: Arc<RegistryService<S, P>>,
        conditions: Arc<ConditionReader<P>>,
        forecast: Arc<ForecastService<P>>,
        platform: Arc<P>,
        switch: Arc<AutomationSwitch>,
        control: ControlConfig,
    ) -> Self {
        Self {
            registry,
            conditions,
            forecast,
            platform,
            switch,
            control,
        }
    }
}
