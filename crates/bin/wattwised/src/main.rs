//! # wattwised — wattwise daemon
//!
//! Composition root that wires all adapters together and starts the
//! controller.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env var overrides)
//! - Construct the platform client and registry store (adapters)
//! - Load the device registry and spawn the control loop
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use wattwise_adapter_homeassistant::HomeAssistantClient;
use wattwise_adapter_http_axum::state::AppState;
use wattwise_adapter_storage_json::JsonDeviceStore;
use wattwise_app::automation_switch::AutomationSwitch;
use wattwise_app::conditions::ConditionReader;
use wattwise_app::control_loop::ControlLoop;
use wattwise_app::forecast_service::ForecastService;
use wattwise_app::registry::RegistryService;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    tracing::info!("starting wattwise energy controller");

    // Platform + storage adapters
    let platform = HomeAssistantClient::new(
        config.platform.base_url.as_str(),
        config.platform.token.as_str(),
    )?;
    let store = JsonDeviceStore::new(config.storage.path.as_str());

    // Shared state
    let registry = Arc::new(RegistryService::load(store, platform.clone()).await?);
    let switch = Arc::new(AutomationSwitch::new(config.control.automation_enabled));

    // Control loop
    let control_loop = ControlLoop::new(
        platform.clone(),
        Arc::clone(&registry),
        Arc::clone(&switch),
        ConditionReader::new(platform.clone(), config.sensors.clone()),
        config.control.clone(),
    );
    tokio::spawn(control_loop.run());

    // HTTP
    let state = AppState::new(
        registry,
        Arc::new(ConditionReader::new(
            platform.clone(),
            config.sensors.clone(),
        )),
        Arc::new(ForecastService::new(
            platform.clone(),
            config.sensors.clone(),
        )),
        Arc::new(platform),
        switch,
        config.control.clone(),
    );
    let app = wattwise_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "serving HTTP API");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
