use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder substituted with the checksummed address in endpoint and referer templates.
pub const ADDRESS_PLACEHOLDER: &str = "{address}";
/// Placeholder substituted with the explorer origin when the config is resolved.
pub const ORIGIN_PLACEHOLDER: &str = "{origin}";

#[derive(Error, Debug)]
pub enum HttpConfigError {
    #[error("Invalid HTTP configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Settings for the peer status API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeerApiConfigRaw {
    /// Base URL queried as `GET <base_url>?id=<node id>`.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl PeerApiConfigRaw {
    pub fn resolve(self) -> Result<PeerApiConfig, HttpConfigError> {
        let base_url = parse_http_url("peer_api.base_url", &self.base_url)?;
        let timeout = positive_timeout("peer_api.timeout_ms", self.timeout_ms)?;

        Ok(PeerApiConfig {
            base_url,
            timeout,
            user_agent: self.user_agent,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PeerApiConfig {
    base_url: Url,
    timeout: Duration,
    user_agent: String,
}

impl PeerApiConfig {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Settings for the block explorer queried for last activity.
///
/// Endpoint templates are tried in order. `{origin}` is replaced with `origin`
/// once at load time and `{address}` with the node address on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExplorerConfigRaw {
    /// Explorer origin, also sent as the `Origin` header.
    pub origin: String,
    /// Ordered endpoint URL templates.
    pub endpoints: Vec<String>,
    /// `Referer` header template.
    pub referer: String,
    /// Per-endpoint request timeout in milliseconds.
    pub timeout_ms: u64,
    pub user_agent: String,
    pub accept_language: String,
}

impl ExplorerConfigRaw {
    pub fn resolve(self) -> Result<ExplorerConfig, HttpConfigError> {
        let origin = self.origin.trim_end_matches('/').to_string();
        parse_http_url("explorer.origin", &origin)?;
        let timeout = positive_timeout("explorer.timeout_ms", self.timeout_ms)?;

        if self.endpoints.is_empty() {
            return Err(HttpConfigError::InvalidConfig(
                "explorer.endpoints must include at least one endpoint".to_string(),
            ));
        }

        let endpoints = self
            .endpoints
            .iter()
            .map(|template| {
                if !template.contains(ADDRESS_PLACEHOLDER) {
                    return Err(HttpConfigError::InvalidConfig(format!(
                        "explorer endpoint '{}' has no {} placeholder",
                        template, ADDRESS_PLACEHOLDER
                    )));
                }
                Ok(template.replace(ORIGIN_PLACEHOLDER, &origin))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ExplorerConfig {
            referer: self.referer.replace(ORIGIN_PLACEHOLDER, &origin),
            origin,
            endpoints,
            timeout,
            user_agent: self.user_agent,
            accept_language: self.accept_language,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    origin: String,
    endpoints: Vec<String>,
    referer: String,
    timeout: Duration,
    user_agent: String,
    accept_language: String,
}

impl ExplorerConfig {
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    pub fn referer(&self) -> &str {
        &self.referer
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn accept_language(&self) -> &str {
        &self.accept_language
    }
}

fn parse_http_url(field: &str, value: &str) -> Result<Url, HttpConfigError> {
    let url = value
        .parse::<Url>()
        .map_err(|e| HttpConfigError::InvalidConfig(format!("{} '{}': {}", field, value, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(HttpConfigError::InvalidConfig(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }
    Ok(url)
}

fn positive_timeout(field: &str, millis: u64) -> Result<Duration, HttpConfigError> {
    if millis == 0 {
        return Err(HttpConfigError::InvalidConfig(format!(
            "{} must be greater than 0",
            field
        )));
    }
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn explorer_raw() -> ExplorerConfigRaw {
        ExplorerConfigRaw {
            origin: "https://explorer.example.org/".to_string(),
            endpoints: vec![
                "{origin}/api/v2/addresses/{address}/internal-transactions".to_string(),
                "{origin}/api/v1/addresses/{address}/internal-transactions".to_string(),
            ],
            referer: "{origin}/address/{address}?tab=internal_txns".to_string(),
            timeout_ms: 10_000,
            user_agent: "Mozilla/5.0".to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
        }
    }

    #[test]
    fn explorer_resolve_expands_origin() {
        let config = explorer_raw().resolve().unwrap();

        assert_eq!(config.origin(), "https://explorer.example.org");
        assert_eq!(
            config.endpoints()[0],
            "https://explorer.example.org/api/v2/addresses/{address}/internal-transactions"
        );
        assert_eq!(
            config.referer(),
            "https://explorer.example.org/address/{address}?tab=internal_txns"
        );
    }

    #[test]
    fn explorer_resolve_rejects_template_without_address() {
        let mut raw = explorer_raw();
        raw.endpoints.push("{origin}/api/v2/stats".to_string());

        assert!(matches!(
            raw.resolve(),
            Err(HttpConfigError::InvalidConfig(ref msg)) if msg.contains("{address}")
        ));
    }

    #[test]
    fn explorer_resolve_rejects_empty_endpoint_list() {
        let mut raw = explorer_raw();
        raw.endpoints.clear();
        assert!(raw.resolve().is_err());
    }

    #[test]
    fn peer_api_resolve_rejects_zero_timeout() {
        let raw = PeerApiConfigRaw {
            base_url: "https://dashboard.example.org/api/v1/peer".to_string(),
            timeout_ms: 0,
            user_agent: "Mozilla/5.0".to_string(),
        };

        assert!(matches!(
            raw.resolve(),
            Err(HttpConfigError::InvalidConfig(ref msg)) if msg.contains("timeout_ms")
        ));
    }
}
