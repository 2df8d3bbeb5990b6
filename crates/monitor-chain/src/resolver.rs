use std::time::Instant;

use alloy::{primitives::Address, providers::Provider};
use monitor_domain::NodeId;

use crate::{
    ChainConfig,
    contracts::SwarmCoordinator,
    error::ChainError,
    provider::{ChainProvider, initialize_provider},
};

/// How a batch of node ids was mapped to on-chain addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The contract answered; individual entries may still be unset.
    Resolved,
    /// Nothing to resolve; no call was made.
    Skipped,
    /// The call failed and every entry is unset for this cycle.
    Degraded { reason: String },
}

/// Addresses aligned by position with the roster that was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressResolution {
    addresses: Vec<Option<Address>>,
    outcome: ResolutionOutcome,
}

impl AddressResolution {
    pub fn resolved(addresses: Vec<Option<Address>>) -> Self {
        Self {
            addresses,
            outcome: ResolutionOutcome::Resolved,
        }
    }

    pub fn skipped() -> Self {
        Self {
            addresses: Vec::new(),
            outcome: ResolutionOutcome::Skipped,
        }
    }

    pub fn degraded(len: usize, reason: impl Into<String>) -> Self {
        Self {
            addresses: vec![None; len],
            outcome: ResolutionOutcome::Degraded {
                reason: reason.into(),
            },
        }
    }

    /// Address for the roster entry at `index`.
    pub fn get(&self, index: usize) -> Option<Address> {
        self.addresses.get(index).copied().flatten()
    }

    pub fn addresses(&self) -> &[Option<Address>] {
        &self.addresses
    }

    pub fn outcome(&self) -> &ResolutionOutcome {
        &self.outcome
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.outcome, ResolutionOutcome::Degraded { .. })
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.addresses.iter().filter(|address| address.is_some()).count()
    }
}

/// Aligns a contract answer with the `requested` roster entries.
///
/// The zero address means "no address registered". Entries the contract did not
/// answer for (short response) are unset; surplus entries are ignored.
pub fn align_addresses(requested: usize, returned: Vec<Address>) -> Vec<Option<Address>> {
    let mut returned = returned.into_iter();
    (0..requested)
        .map(|_| returned.next().filter(|address| !address.is_zero()))
        .collect()
}

/// Resolves node ids to their externally owned accounts through the swarm
/// coordinator contract, one batched `getEoa` call per cycle.
pub struct ChainAddressResolver {
    chain_id: u64,
    contract_address: Address,
    provider: ChainProvider,
}

impl ChainAddressResolver {
    pub fn new(config: &ChainConfig) -> Result<Self, ChainError> {
        let provider = initialize_provider(config)?;

        tracing::info!(
            chain_id = config.chain_id(),
            contract = %config.contract_address(),
            endpoints = config.rpc_endpoints().len(),
            "Chain address resolver initialized"
        );

        Ok(Self {
            chain_id: config.chain_id(),
            contract_address: config.contract_address(),
            provider,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Returns the latest block number; used as a startup connectivity probe.
    pub async fn check_connectivity(&self) -> Result<u64, ChainError> {
        let block = self.provider.get_block_number().await?;
        Ok(block)
    }

    /// Issues the raw `getEoa` call for the given ids.
    pub async fn fetch_addresses(&self, node_ids: &[NodeId]) -> Result<Vec<Address>, ChainError> {
        let peer_ids: Vec<String> = node_ids.iter().map(|id| id.as_str().to_string()).collect();
        let contract = SwarmCoordinator::new(self.contract_address, self.provider.clone());
        let addresses = contract.getEoa(peer_ids).call().await?;
        Ok(addresses)
    }

    /// Resolves every roster entry, degrading to "no address" for the whole
    /// batch if the call fails.
    #[tracing::instrument(
        name = "chain.resolve_addresses",
        skip(self, node_ids),
        fields(
            chain_id = self.chain_id,
            requested = node_ids.len(),
            resolved = tracing::field::Empty,
        )
    )]
    pub async fn resolve(&self, node_ids: &[NodeId]) -> AddressResolution {
        if node_ids.is_empty() {
            return AddressResolution::skipped();
        }

        let started = Instant::now();
        let resolution = match self.fetch_addresses(node_ids).await {
            Ok(addresses) => {
                if addresses.len() != node_ids.len() {
                    tracing::warn!(
                        requested = node_ids.len(),
                        returned = addresses.len(),
                        "Contract returned a different number of addresses than requested"
                    );
                }
                AddressResolution::resolved(align_addresses(node_ids.len(), addresses))
            }
            Err(error) => {
                tracing::error!(
                    error = %error,
                    kind = error.kind(),
                    "Failed to resolve node addresses; continuing without addresses"
                );
                AddressResolution::degraded(node_ids.len(), error.to_string())
            }
        };

        let status = if resolution.is_degraded() { "degraded" } else { "ok" };
        monitor_observability::record_address_resolution(
            self.chain_id,
            status,
            node_ids.len(),
            resolution.resolved_count(),
            started.elapsed(),
        );
        tracing::Span::current().record("resolved", resolution.resolved_count());
        tracing::info!(
            "Resolved {}/{} node addresses",
            resolution.resolved_count(),
            node_ids.len()
        );

        resolution
    }
}
