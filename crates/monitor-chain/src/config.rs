use std::time::Duration;

use alloy::{primitives::Address, transports::http::reqwest::Url};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Connection settings for the chain holding the peer registry contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfigRaw {
    /// EVM chain id, used for logs and metrics labels.
    pub chain_id: u64,

    /// HTTP JSON-RPC endpoints. Multiple endpoints enable failover, tried one at a time.
    #[serde(default)]
    pub rpc_endpoints: Vec<String>,

    /// Address of the contract exposing `getEoa(string[])`.
    pub contract_address: String,

    /// Per-request timeout for RPC calls in milliseconds.
    pub request_timeout_ms: u64,
}

impl ChainConfigRaw {
    /// Ensures at least one RPC endpoint is configured.
    pub fn ensure_rpc_endpoints(&self) -> Result<(), ConfigError> {
        if self.rpc_endpoints.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "rpc_endpoints must include at least one endpoint".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ensure_request_timeout(&self) -> Result<(), ConfigError> {
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidConfig(
                "request_timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn resolve(self) -> Result<ChainConfig, ConfigError> {
        self.ensure_rpc_endpoints()?;
        self.ensure_request_timeout()?;

        let rpc_endpoints = self
            .rpc_endpoints
            .iter()
            .map(|endpoint| parse_rpc_url(endpoint))
            .collect::<Result<Vec<_>, _>>()?;
        let contract_address = parse_evm_address(&self.contract_address)?;

        Ok(ChainConfig {
            chain_id: self.chain_id,
            rpc_endpoints,
            contract_address,
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ChainConfig {
    chain_id: u64,
    rpc_endpoints: Vec<Url>,
    contract_address: Address,
    request_timeout: Duration,
}

impl ChainConfig {
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn rpc_endpoints(&self) -> &[Url] {
        &self.rpc_endpoints
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

fn parse_rpc_url(value: &str) -> Result<Url, ConfigError> {
    let url = value
        .parse::<Url>()
        .map_err(|e| ConfigError::InvalidConfig(format!("invalid RPC URL '{}': {}", value, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidConfig(format!(
            "RPC URL '{}' must use http or https",
            value
        )));
    }
    Ok(url)
}

fn parse_evm_address(value: &str) -> Result<Address, ConfigError> {
    let address = value
        .parse::<Address>()
        .map_err(|e| ConfigError::InvalidConfig(format!("invalid EVM address '{}': {}", value, e)))?;
    if address.is_zero() {
        return Err(ConfigError::InvalidConfig(
            "contract_address must not be the zero address".to_string(),
        ));
    }
    Ok(address)
}
