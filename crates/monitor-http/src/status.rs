use std::time::Instant;

use monitor_domain::{NodeId, PeerStatus, UNKNOWN_NAME};
use reqwest::Client;
use serde_json::{Map, Value};

use crate::{HttpConfigError, PeerApiConfig, StatusUnavailable};

/// Result of one status lookup. Failures are data, never errors.
#[derive(Debug)]
pub enum StatusOutcome {
    Available(PeerStatus),
    Unavailable(StatusUnavailable),
}

impl StatusOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            StatusOutcome::Available(_) => "available",
            StatusOutcome::Unavailable(reason) => reason.kind(),
        }
    }
}

/// Client for the dashboard peer endpoint (`GET <base>?id=<node id>`).
pub struct PeerStatusClient {
    client: Client,
    config: PeerApiConfig,
}

impl PeerStatusClient {
    pub fn new(config: PeerApiConfig) -> Result<Self, HttpConfigError> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client, config })
    }

    pub async fn fetch(&self, node_id: &NodeId) -> StatusOutcome {
        let started = Instant::now();
        let outcome = match self.fetch_status(node_id).await {
            Ok(status) => StatusOutcome::Available(status),
            Err(reason) => {
                tracing::warn!(
                    node_id = %node_id,
                    reason = %reason,
                    "Peer status unavailable"
                );
                StatusOutcome::Unavailable(reason)
            }
        };
        monitor_observability::record_status_fetch(outcome.label(), started.elapsed());
        outcome
    }

    async fn fetch_status(&self, node_id: &NodeId) -> Result<PeerStatus, StatusUnavailable> {
        let response = self
            .client
            .get(self.config.base_url().clone())
            .query(&[("id", node_id.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusUnavailable::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;
        let Value::Object(fields) = value else {
            return Err(StatusUnavailable::NotAnObject);
        };
        if fields.is_empty() {
            return Err(StatusUnavailable::Empty);
        }

        let peer_status = parse_peer_status(&fields);
        tracing::debug!(node_id = %node_id, name = %peer_status.name, "Fetched peer status");
        Ok(peer_status)
    }
}

/// Reads the known fields of a status object, defaulting each one independently.
///
/// Upstream `score` becomes `primary_score` and upstream `reward` becomes
/// `secondary_score`; the pairing is intentional.
pub fn parse_peer_status(fields: &Map<String, Value>) -> PeerStatus {
    let name = match fields.get("peerName") {
        Some(Value::String(name)) => name.clone(),
        Some(Value::Null) | None => UNKNOWN_NAME.to_string(),
        Some(other) => other.to_string(),
    };

    PeerStatus {
        name,
        primary_score: numeric_field(fields, "score"),
        secondary_score: numeric_field(fields, "reward"),
        online: fields.get("online").and_then(Value::as_bool).unwrap_or(false),
    }
}

fn numeric_field(fields: &Map<String, Value>, key: &str) -> f64 {
    match fields.get(key) {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::time::Duration;

    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::*;
    use crate::PeerApiConfigRaw;

    fn client_for(server: &MockServer, timeout_ms: u64) -> PeerStatusClient {
        let config = PeerApiConfigRaw {
            base_url: format!("{}/api/v1/peer", server.uri()),
            timeout_ms,
            user_agent: "Mozilla/5.0 (test)".to_string(),
        }
        .resolve()
        .unwrap();
        PeerStatusClient::new(config).unwrap()
    }

    async fn mount(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/api/v1/peer"))
            .and(query_param("id", "QmPeer"))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn fetch_maps_score_to_primary_and_reward_to_secondary() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({
                "peerName": "tall-swift-otter",
                "score": 12,
                "reward": 3400,
                "online": true
            })),
        )
        .await;

        let outcome = client_for(&server, 1_000).fetch(&NodeId::from("QmPeer")).await;

        let StatusOutcome::Available(status) = outcome else {
            panic!("expected available status, got {outcome:?}");
        };
        assert_eq!(status.name, "tall-swift-otter");
        assert_eq!(status.primary_score, 12.0);
        assert_eq!(status.secondary_score, 3400.0);
        assert!(status.online);
    }

    #[tokio::test]
    async fn fetch_defaults_missing_fields_independently() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({ "reward": 5 })),
        )
        .await;

        let outcome = client_for(&server, 1_000).fetch(&NodeId::from("QmPeer")).await;

        let StatusOutcome::Available(status) = outcome else {
            panic!("expected available status, got {outcome:?}");
        };
        assert_eq!(status.name, "Unknown");
        assert_eq!(status.primary_score, 0.0);
        assert_eq!(status.secondary_score, 5.0);
        assert!(!status.online);
    }

    #[tokio::test]
    async fn fetch_reports_http_error_as_unavailable() {
        let server = MockServer::start().await;
        mount(&server, ResponseTemplate::new(502)).await;

        let outcome = client_for(&server, 1_000).fetch(&NodeId::from("QmPeer")).await;

        assert!(matches!(
            outcome,
            StatusOutcome::Unavailable(StatusUnavailable::Status(502))
        ));
    }

    #[tokio::test]
    async fn fetch_reports_invalid_json_as_unavailable() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
        )
        .await;

        let outcome = client_for(&server, 1_000).fetch(&NodeId::from("QmPeer")).await;

        assert!(matches!(
            outcome,
            StatusOutcome::Unavailable(StatusUnavailable::InvalidJson(_))
        ));
    }

    #[tokio::test]
    async fn fetch_rejects_non_object_and_empty_bodies() {
        let server = MockServer::start().await;
        mount(&server, ResponseTemplate::new(200).set_body_json(json!([1, 2]))).await;
        let outcome = client_for(&server, 1_000).fetch(&NodeId::from("QmPeer")).await;
        assert!(matches!(
            outcome,
            StatusOutcome::Unavailable(StatusUnavailable::NotAnObject)
        ));

        let server = MockServer::start().await;
        mount(&server, ResponseTemplate::new(200).set_body_json(json!({}))).await;
        let outcome = client_for(&server, 1_000).fetch(&NodeId::from("QmPeer")).await;
        assert!(matches!(
            outcome,
            StatusOutcome::Unavailable(StatusUnavailable::Empty)
        ));
    }

    #[tokio::test]
    async fn fetch_times_out_as_unavailable() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(json!({ "peerName": "slow" }))
                .set_delay(Duration::from_secs(2)),
        )
        .await;

        let outcome = client_for(&server, 100).fetch(&NodeId::from("QmPeer")).await;

        assert!(matches!(
            outcome,
            StatusOutcome::Unavailable(StatusUnavailable::Transport(_))
        ));
        assert_eq!(outcome.label(), "timeout");
    }

    #[test]
    fn parse_accepts_numeric_strings_and_null_name() {
        let fields = json!({ "peerName": null, "score": "7", "reward": "1.5" });
        let status = parse_peer_status(fields.as_object().unwrap());

        assert_eq!(status.name, "Unknown");
        assert_eq!(status.primary_score, 7.0);
        assert_eq!(status.secondary_score, 1.5);
    }
}
