//! # wattwise-adapter-homeassistant
//!
//! Platform adapter for Home Assistant. Implements the [`Platform`] port
//! over the HA REST API: state reads, `turn_on`/`turn_off` service calls
//! routed by entity domain, automation triggers, and published sensors for
//! decision records.
//!
//! ## Dependency rule
//! Depends on `wattwise-app` (port traits) and `wattwise-domain` only —
//! nothing in the core ever sees `reqwest`.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use wattwise_app::ports::Platform;
use wattwise_domain::error::{PlatformError, WattwiseError};
use wattwise_domain::id::EntityId;
use wattwise_domain::state::{DiscoveredEntity, StateSnapshot};

/// Entity domains offered to the user as controllable.
const CONTROLLABLE_DOMAINS: [&str; 4] = ["switch", "light", "button", "input_boolean"];

/// Home Assistant REST API client.
#[derive(Debug, Clone)]
pub struct HomeAssistantClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

/// Wire format of one HA state object.
#[derive(Debug, Deserialize)]
struct HaState {
    entity_id: String,
    state: String,
    #[serde(default)]
    attributes: BTreeMap<String, serde_json::Value>,
}

impl From<HaState> for StateSnapshot {
    fn from(raw: HaState) -> Self {
        Self {
            state: raw.state,
            attributes: raw.attributes,
        }
    }
}

impl HomeAssistantClient {
    /// Create a client against `base_url` (without trailing slash) using a
    /// long-lived access token.
    ///
    /// # Errors
    ///
    /// Returns [`WattwiseError::Platform`] when the HTTP client cannot be
    /// built.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, WattwiseError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| PlatformError::Request(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_state_raw(&self, id: &EntityId) -> Result<Option<HaState>, WattwiseError> {
        let response = self
            .client
            .get(self.url(&format!("/api/states/{id}")))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|err| PlatformError::Request(err.to_string()))?;

        match response.status() {
            reqwest::StatusCode::OK => {
                let state = response
                    .json::<HaState>()
                    .await
                    .map_err(|err| PlatformError::Decode(err.to_string()))?;
                Ok(Some(state))
            }
            reqwest::StatusCode::NOT_FOUND => Ok(None),
            status => Err(PlatformError::Status(status.as_u16()).into()),
        }
    }

    async fn post(&self, path: &str, payload: &serde_json::Value) -> Result<(), WattwiseError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await
            .map_err(|err| PlatformError::Request(err.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(PlatformError::Status(response.status().as_u16()).into())
        }
    }
}

impl Platform for HomeAssistantClient {
    async fn state(&self, id: &EntityId) -> Result<Option<StateSnapshot>, WattwiseError> {
        Ok(self.get_state_raw(id).await?.map(StateSnapshot::from))
    }

    async fn sensor_value(&self, id: &EntityId) -> Result<f64, WattwiseError> {
        let Some(state) = self.get_state_raw(id).await? else {
            return Err(PlatformError::Request(format!("no such sensor: {id}")).into());
        };
        state.state.parse().map_err(|_| {
            PlatformError::Decode(format!("sensor {id} is not numeric: {}", state.state)).into()
        })
    }

    #[tracing::instrument(skip(self), fields(device = %id))]
    async fn turn_on(&self, id: &EntityId) -> Result<(), WattwiseError> {
        let payload = serde_json::json!({ "entity_id": id.as_str() });
        self.post(&format!("/api/services/{}/turn_on", id.domain()), &payload)
            .await
    }

    #[tracing::instrument(skip(self), fields(device = %id))]
    async fn turn_off(&self, id: &EntityId) -> Result<(), WattwiseError> {
        let payload = serde_json::json!({ "entity_id": id.as_str() });
        self.post(&format!("/api/services/{}/turn_off", id.domain()), &payload)
            .await
    }

    #[tracing::instrument(skip(self, payload))]
    async fn call_service(
        &self,
        domain: &str,
        service: &str,
        payload: serde_json::Value,
    ) -> Result<(), WattwiseError> {
        self.post(&format!("/api/services/{domain}/{service}"), &payload)
            .await
    }

    async fn publish_state(
        &self,
        id: &EntityId,
        snapshot: StateSnapshot,
    ) -> Result<(), WattwiseError> {
        let payload = serde_json::json!({
            "state": snapshot.state,
            "attributes": snapshot.attributes,
        });
        self.post(&format!("/api/states/{id}"), &payload).await
    }

    async fn controllable_entities(&self) -> Result<Vec<DiscoveredEntity>, WattwiseError> {
        let response = self
            .client
            .get(self.url("/api/states"))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|err| PlatformError::Request(err.to_string()))?;

        if !response.status().is_success() {
            return Err(PlatformError::Status(response.status().as_u16()).into());
        }

        let states = response
            .json::<Vec<HaState>>()
            .await
            .map_err(|err| PlatformError::Decode(err.to_string()))?;

        let mut entities = Vec::new();
        for raw in states {
            let Ok(entity_id) = EntityId::new(raw.entity_id.clone()) else {
                continue;
            };
            if !CONTROLLABLE_DOMAINS.contains(&entity_id.domain()) {
                continue;
            }
            let snapshot = StateSnapshot::from(raw);
            entities.push(DiscoveredEntity {
                name: snapshot
                    .friendly_name()
                    .map_or_else(|| entity_id.to_string(), ToString::to_string),
                state: snapshot.state,
                domain: entity_id.domain().to_string(),
                entity_id,
            });
        }
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> EntityId {
        EntityId::new(raw).unwrap()
    }

    fn client(server: &mockito::ServerGuard) -> HomeAssistantClient {
        HomeAssistantClient::new(server.url(), "test-token").unwrap()
    }

    #[tokio::test]
    async fn should_read_state_with_attributes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/states/switch.washer")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_body(
                r#"{"entity_id":"switch.washer","state":"on","attributes":{"friendly_name":"Washer"}}"#,
            )
            .create_async()
            .await;

        let state = client(&server)
            .state(&id("switch.washer"))
            .await
            .unwrap()
            .unwrap();

        assert!(state.is_on());
        assert_eq!(state.friendly_name(), Some("Washer"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn should_return_none_for_unknown_entity() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/states/switch.ghost")
            .with_status(404)
            .create_async()
            .await;

        let state = client(&server).state(&id("switch.ghost")).await.unwrap();
        assert!(state.is_none());
    }

    #[tokio::test]
    async fn should_map_server_error_to_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/states/switch.washer")
            .with_status(500)
            .create_async()
            .await;

        let result = client(&server).state(&id("switch.washer")).await;
        assert!(matches!(
            result,
            Err(WattwiseError::Platform(PlatformError::Status(500)))
        ));
    }

    #[tokio::test]
    async fn should_parse_numeric_sensor_value() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/states/sensor.solar")
            .with_status(200)
            .with_body(r#"{"entity_id":"sensor.solar","state":"1523.5","attributes":{}}"#)
            .create_async()
            .await;

        let value = client(&server)
            .sensor_value(&id("sensor.solar"))
            .await
            .unwrap();
        assert_eq!(value, 1523.5);
    }

    #[tokio::test]
    async fn should_reject_non_numeric_sensor_value() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/states/sensor.solar")
            .with_status(200)
            .with_body(r#"{"entity_id":"sensor.solar","state":"unavailable","attributes":{}}"#)
            .create_async()
            .await;

        let result = client(&server).sensor_value(&id("sensor.solar")).await;
        assert!(matches!(
            result,
            Err(WattwiseError::Platform(PlatformError::Decode(_)))
        ));
    }

    #[tokio::test]
    async fn should_route_turn_on_by_entity_domain() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/services/light/turn_on")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "entity_id": "light.kitchen"
            })))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        client(&server).turn_on(&id("light.kitchen")).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn should_propagate_failed_turn_off() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/services/switch/turn_off")
            .with_status(503)
            .create_async()
            .await;

        let result = client(&server).turn_off(&id("switch.washer")).await;
        assert!(matches!(
            result,
            Err(WattwiseError::Platform(PlatformError::Status(503)))
        ));
    }

    #[tokio::test]
    async fn should_publish_state_with_attributes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/states/sensor.sec_switch_washer")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "state": "on",
                "attributes": { "reason": "solar_excess" }
            })))
            .with_status(201)
            .create_async()
            .await;

        let snapshot = StateSnapshot::new("on")
            .with_attribute("reason", serde_json::json!("solar_excess"));
        client(&server)
            .publish_state(&id("sensor.sec_switch_washer"), snapshot)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn should_filter_controllable_domains() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/states")
            .with_status(200)
            .with_body(
                r#"[
                    {"entity_id":"switch.washer","state":"off","attributes":{"friendly_name":"Washer"}},
                    {"entity_id":"sensor.solar","state":"1500","attributes":{}},
                    {"entity_id":"light.kitchen","state":"on","attributes":{}},
                    {"entity_id":"climate.living_room","state":"heat","attributes":{}}
                ]"#,
            )
            .create_async()
            .await;

        let entities = client(&server).controllable_entities().await.unwrap();

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].entity_id.as_str(), "switch.washer");
        assert_eq!(entities[0].name, "Washer");
        assert_eq!(entities[1].entity_id.as_str(), "light.kitchen");
        // Falls back to the id when there is no friendly name.
        assert_eq!(entities[1].name, "light.kitchen");
    }
}
