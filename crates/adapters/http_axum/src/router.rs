//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use wattwise_app::ports::{DeviceStore, Platform};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the API routes under `/api` and a `/health` probe. Includes a
/// [`TraceLayer`] that logs each HTTP request/response at the `DEBUG`
/// level using the `tracing` ecosystem.
pub fn build<S, P>(state: AppState<S, P>) -> Router
where
    S: DeviceStore + Send + Sync + 'static,
    P: Platform + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use wattwise_app::automation_switch::AutomationSwitch;
    use wattwise_app::conditions::ConditionReader;
    use wattwise_app::config::{ControlConfig, SensorsConfig};
    use wattwise_app::forecast_service::ForecastService;
    use wattwise_app::ports::storage::DeviceDocument;
    use wattwise_app::registry::RegistryService;
    use wattwise_domain::error::WattwiseError;
    use wattwise_domain::id::EntityId;
    use wattwise_domain::state::{DiscoveredEntity, StateSnapshot};

    #[derive(Clone)]
    struct StubPlatform;
    struct StubStore;

    impl wattwise_app::ports::Platform for StubPlatform {
        async fn state(&self, _id: &EntityId) -> Result<Option<StateSnapshot>, WattwiseError> {
            Ok(None)
        }
        async fn sensor_value(&self, _id: &EntityId) -> Result<f64, WattwiseError> {
            Ok(0.0)
        }
        async fn turn_on(&self, _id: &EntityId) -> Result<(), WattwiseError> {
            Ok(())
        }
        async fn turn_off(&self, _id: &EntityId) -> Result<(), WattwiseError> {
            Ok(())
        }
        async fn call_service(
            &self,
            _domain: &str,
            _service: &str,
            _payload: serde_json::Value,
        ) -> Result<(), WattwiseError> {
            Ok(())
        }
        async fn publish_state(
            &self,
            _id: &EntityId,
            _snapshot: StateSnapshot,
        ) -> Result<(), WattwiseError> {
            Ok(())
        }
        async fn controllable_entities(&self) -> Result<Vec<DiscoveredEntity>, WattwiseError> {
            Ok(vec![])
        }
    }

    impl wattwise_app::ports::DeviceStore for StubStore {
        async fn load(&self) -> Result<DeviceDocument, WattwiseError> {
            Ok(DeviceDocument::new())
        }
        async fn save(&self, _devices: &DeviceDocument) -> Result<(), WattwiseError> {
            Ok(())
        }
    }

    fn test_state() -> AppState<StubStore, StubPlatform> {
        AppState::new(
            Arc::new(RegistryService::new(StubStore, StubPlatform)),
            Arc::new(ConditionReader::new(StubPlatform, SensorsConfig::default())),
            Arc::new(ForecastService::new(StubPlatform, SensorsConfig::default())),
            Arc::new(StubPlatform),
            Arc::new(AutomationSwitch::new(true)),
            ControlConfig::default(),
        )
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_serve_energy_status() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/energy/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_route() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
