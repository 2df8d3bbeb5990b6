//! Last-activity discovery against an unstable explorer API.
//!
//! The explorer exposes several live, mutually inconsistent variants of its
//! internal-transactions endpoint. They are tried in a fixed order and the
//! first one answering with a recognizable transaction list is used, even if
//! that list is empty. Timestamps are then sniffed from a fixed set of fields.

mod endpoint;
mod shape;
mod timestamp;

use std::time::Instant;

use chrono::{DateTime, Utc};
use monitor_domain::Address;
use reqwest::Client;
use serde_json::Value;

pub use endpoint::{ActivityEndpoint, ExplorerEndpoint};
pub use shape::{TRANSACTION_LIST_KEYS, extract_transactions};
pub use timestamp::{TIMESTAMP_FIELDS, latest_activity, minutes_since, parse_timestamp};

use crate::{EndpointFailure, ExplorerConfig, HttpConfigError};

/// What the probe learned about one address.
#[derive(Debug)]
pub enum ActivityOutcome {
    /// A transaction list was found and at least one timestamp parsed.
    Observed {
        endpoint: usize,
        latest: DateTime<Utc>,
        minutes: u64,
    },
    /// A transaction list was found but yielded no usable timestamp.
    NoTimestamp { endpoint: usize, transactions: usize },
    /// No endpoint produced a transaction list.
    Unavailable { failures: Vec<EndpointFailure> },
}

impl ActivityOutcome {
    pub fn minutes(&self) -> Option<u64> {
        match self {
            ActivityOutcome::Observed { minutes, .. } => Some(*minutes),
            _ => None,
        }
    }

    /// Position of the endpoint that answered, if any.
    pub fn endpoint(&self) -> Option<usize> {
        match self {
            ActivityOutcome::Observed { endpoint, .. }
            | ActivityOutcome::NoTimestamp { endpoint, .. } => Some(*endpoint),
            ActivityOutcome::Unavailable { .. } => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityOutcome::Observed { .. } => "observed",
            ActivityOutcome::NoTimestamp { .. } => "no_timestamp",
            ActivityOutcome::Unavailable { .. } => "unavailable",
        }
    }
}

pub struct ActivityProbe {
    endpoints: Vec<Box<dyn ActivityEndpoint>>,
}

impl ActivityProbe {
    /// Builds the probe over the configured explorer endpoints, sharing one client.
    pub fn new(config: &ExplorerConfig) -> Result<Self, HttpConfigError> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .build()?;

        let endpoints = config
            .endpoints()
            .iter()
            .map(|template| {
                Box::new(ExplorerEndpoint::new(
                    client.clone(),
                    template.as_str(),
                    config.referer(),
                    config.origin(),
                    config.accept_language(),
                )) as Box<dyn ActivityEndpoint>
            })
            .collect();

        Ok(Self::with_endpoints(endpoints))
    }

    pub fn with_endpoints(endpoints: Vec<Box<dyn ActivityEndpoint>>) -> Self {
        Self { endpoints }
    }

    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }

    /// Minutes since the latest activity of `address`, measured once the data is in.
    pub async fn probe(&self, address: &Address) -> ActivityOutcome {
        self.probe_with_clock(address, Utc::now).await
    }

    /// Same as [`probe`](Self::probe) with an explicit reference time.
    pub async fn probe_at(&self, address: &Address, now: DateTime<Utc>) -> ActivityOutcome {
        self.probe_with_clock(address, || now).await
    }

    async fn probe_with_clock(
        &self,
        address: &Address,
        now: impl FnOnce() -> DateTime<Utc>,
    ) -> ActivityOutcome {
        let started = Instant::now();
        let outcome = match self.find_transactions(address).await {
            Ok((endpoint, transactions)) => observe(endpoint, &transactions, now()),
            Err(failures) => ActivityOutcome::Unavailable { failures },
        };
        self.report(address, &outcome, started);
        outcome
    }

    /// Walks the endpoints in order and returns the first transaction list.
    async fn find_transactions(
        &self,
        address: &Address,
    ) -> Result<(usize, Vec<Value>), Vec<EndpointFailure>> {
        let mut failures = Vec::new();

        for (index, endpoint) in self.endpoints.iter().enumerate() {
            match endpoint.fetch_transactions(address).await {
                Ok(transactions) => {
                    tracing::debug!(
                        endpoint = %endpoint.describe(address),
                        transactions = transactions.len(),
                        "Activity endpoint answered"
                    );
                    return Ok((index, transactions));
                }
                Err(failure) => {
                    tracing::debug!(
                        endpoint = index,
                        reason = %failure,
                        "Activity endpoint unusable, trying next"
                    );
                    monitor_observability::record_activity_endpoint_failure(index, failure.kind());
                    failures.push(failure);
                }
            }
        }

        Err(failures)
    }

    fn report(&self, address: &Address, outcome: &ActivityOutcome, started: Instant) {
        monitor_observability::record_activity_probe(
            outcome.label(),
            outcome.endpoint(),
            started.elapsed(),
        );
        if let ActivityOutcome::Unavailable { failures } = outcome {
            tracing::debug!(
                address = %address,
                attempted = failures.len(),
                "No activity endpoint returned a transaction list"
            );
        }
    }
}

fn observe(endpoint: usize, transactions: &[Value], now: DateTime<Utc>) -> ActivityOutcome {
    match latest_activity(transactions) {
        Some(latest) => ActivityOutcome::Observed {
            endpoint,
            latest,
            minutes: minutes_since(latest, now),
        },
        None => ActivityOutcome::NoTimestamp {
            endpoint,
            transactions: transactions.len(),
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::TimeDelta;
    use monitor_domain::HealthStatus;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, headers, method, path},
    };

    use super::*;
    use crate::ExplorerConfigRaw;

    const ADDRESS: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    fn address() -> Address {
        ADDRESS.parse().unwrap()
    }

    fn probe_for(server: &MockServer, endpoints: &[&str]) -> ActivityProbe {
        let config = ExplorerConfigRaw {
            origin: server.uri(),
            endpoints: endpoints.iter().map(|e| format!("{{origin}}{e}")).collect(),
            referer: "{origin}/address/{address}?tab=internal_txns".to_string(),
            timeout_ms: 1_000,
            user_agent: "Mozilla/5.0 (test)".to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
        }
        .resolve()
        .unwrap();
        ActivityProbe::new(&config).unwrap()
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    async fn mount(server: &MockServer, route: &str, response: ResponseTemplate, calls: u64) {
        Mock::given(method("GET"))
            .and(path(route.replace("{address}", ADDRESS)))
            .respond_with(response)
            .expect(calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn stops_at_first_structurally_valid_list_even_if_empty() {
        let server = MockServer::start().await;
        mount(&server, "/a/{address}", ResponseTemplate::new(500), 1).await;
        mount(
            &server,
            "/b/{address}",
            ResponseTemplate::new(200).set_body_json(json!({ "items": [] })),
            1,
        )
        .await;
        mount(
            &server,
            "/c/{address}",
            ResponseTemplate::new(200).set_body_json(json!([{ "timestamp": "1699997180" }])),
            0,
        )
        .await;

        let probe = probe_for(&server, &["/a/{address}", "/b/{address}", "/c/{address}"]);
        let outcome = probe.probe_at(&address(), now()).await;

        assert!(matches!(
            outcome,
            ActivityOutcome::NoTimestamp {
                endpoint: 1,
                transactions: 0
            }
        ));
        assert_eq!(outcome.minutes(), None);
    }

    #[tokio::test]
    async fn falls_through_invalid_json_and_unknown_shapes() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/a/{address}",
            ResponseTemplate::new(200).set_body_string("<html>challenge</html>"),
            1,
        )
        .await;
        mount(
            &server,
            "/b/{address}",
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Not found" })),
            1,
        )
        .await;
        let latest = now() - TimeDelta::minutes(47);
        mount(
            &server,
            "/c/{address}",
            ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "timestamp": latest.to_rfc3339() },
                    { "timestamp": (latest - TimeDelta::hours(3)).timestamp().to_string() }
                ]
            })),
            1,
        )
        .await;

        let probe = probe_for(&server, &["/a/{address}", "/b/{address}", "/c/{address}"]);
        let outcome = probe.probe_at(&address(), now()).await;

        assert_eq!(outcome.endpoint(), Some(2));
        assert_eq!(outcome.minutes(), Some(47));
        assert_eq!(HealthStatus::classify(outcome.minutes()), HealthStatus::Stale);
    }

    #[tokio::test]
    async fn millisecond_timestamps_are_normalized() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/a/{address}",
            ResponseTemplate::new(200).set_body_json(json!({
                "result": [{ "timestamp": "1699999100000" }]
            })),
            1,
        )
        .await;

        let probe = probe_for(&server, &["/a/{address}"]);
        let outcome = probe.probe_at(&address(), now()).await;

        assert_eq!(outcome.minutes(), Some(15));
        assert_eq!(HealthStatus::classify(outcome.minutes()), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn sends_browser_headers() {
        let server = MockServer::start().await;
        let referer = format!("{}/address/{}?tab=internal_txns", server.uri(), ADDRESS);
        Mock::given(method("GET"))
            .and(path(format!("/a/{ADDRESS}")))
            .and(header("user-agent", "Mozilla/5.0 (test)"))
            .and(header("origin", server.uri().as_str()))
            .and(header("referer", referer.as_str()))
            .and(headers("accept-language", vec!["en-US", "en;q=0.5"]))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let probe = probe_for(&server, &["/a/{address}"]);
        let outcome = probe.probe_at(&address(), now()).await;

        assert_eq!(outcome.endpoint(), Some(0));
    }

    #[tokio::test]
    async fn probe_measures_against_current_time() {
        let server = MockServer::start().await;
        let latest = Utc::now() - TimeDelta::minutes(20);
        mount(
            &server,
            "/a/{address}",
            ResponseTemplate::new(200).set_body_json(json!({
                "items": [{ "timestamp": latest.timestamp().to_string() }]
            })),
            1,
        )
        .await;

        let probe = probe_for(&server, &["/a/{address}"]);
        assert_eq!(probe.endpoint_count(), 1);
        let outcome = probe.probe(&address()).await;

        assert!(matches!(outcome.minutes(), Some(20..=21)));
        assert_eq!(HealthStatus::classify(outcome.minutes()), HealthStatus::Warning);
    }

    #[tokio::test]
    async fn every_endpoint_failing_is_unavailable() {
        let server = MockServer::start().await;
        mount(&server, "/a/{address}", ResponseTemplate::new(404), 1).await;
        mount(&server, "/b/{address}", ResponseTemplate::new(429), 1).await;

        let probe = probe_for(&server, &["/a/{address}", "/b/{address}"]);
        let outcome = probe.probe_at(&address(), now()).await;

        let ActivityOutcome::Unavailable { failures } = &outcome else {
            panic!("expected unavailable outcome, got {outcome:?}");
        };
        assert_eq!(failures.len(), 2);
        assert!(matches!(
            failures[1],
            EndpointFailure::Status { status: 429, .. }
        ));
        assert_eq!(outcome.minutes(), None);
    }

    #[tokio::test]
    async fn non_200_success_status_is_not_accepted() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/a/{address}",
            ResponseTemplate::new(202).set_body_json(json!([{ "timestamp": "1699999100" }])),
            1,
        )
        .await;

        let probe = probe_for(&server, &["/a/{address}"]);
        let outcome = probe.probe_at(&address(), now()).await;

        assert_eq!(outcome.label(), "unavailable");
    }
}
