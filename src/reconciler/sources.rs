use async_trait::async_trait;
use monitor_chain::{AddressResolution, ChainAddressResolver};
use monitor_domain::{Address, NodeId};
use monitor_http::{ActivityOutcome, ActivityProbe, PeerStatusClient, StatusOutcome};

/// Batched node id to address lookup, aligned by position with the input.
#[async_trait]
pub(crate) trait AddressSource: Send + Sync {
    async fn resolve(&self, node_ids: &[NodeId]) -> AddressResolution;
}

#[async_trait]
pub(crate) trait StatusSource: Send + Sync {
    async fn fetch(&self, node_id: &NodeId) -> StatusOutcome;
}

#[async_trait]
pub(crate) trait ActivitySource: Send + Sync {
    async fn probe(&self, address: &Address) -> ActivityOutcome;
}

#[async_trait]
impl AddressSource for ChainAddressResolver {
    async fn resolve(&self, node_ids: &[NodeId]) -> AddressResolution {
        ChainAddressResolver::resolve(self, node_ids).await
    }
}

#[async_trait]
impl StatusSource for PeerStatusClient {
    async fn fetch(&self, node_id: &NodeId) -> StatusOutcome {
        PeerStatusClient::fetch(self, node_id).await
    }
}

#[async_trait]
impl ActivitySource for ActivityProbe {
    async fn probe(&self, address: &Address) -> ActivityOutcome {
        ActivityProbe::probe(self, address).await
    }
}
