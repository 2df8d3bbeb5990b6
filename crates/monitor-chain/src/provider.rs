use std::num::NonZeroUsize;

use alloy::{
    network::Ethereum,
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::client::RpcClient,
    transports::{
        BoxTransport, IntoBoxTransport,
        http::{Http, reqwest},
        layers::FallbackLayer,
    },
};
use tower::ServiceBuilder;

use crate::{ChainConfig, error::ChainError};

pub(crate) type ChainProvider = DynProvider<Ethereum>;

/// Creates a read-only provider over the configured HTTP endpoints.
///
/// No connection is made here: an unreachable RPC surfaces on the first call,
/// where the resolver degrades instead of failing startup.
pub(crate) fn initialize_provider(config: &ChainConfig) -> Result<ChainProvider, ChainError> {
    let http_client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .map_err(|e| ChainError::ProviderInit {
            reason: e.to_string(),
        })?;

    let transports: Vec<BoxTransport> = config
        .rpc_endpoints()
        .iter()
        .map(|url| {
            tracing::debug!("HTTP RPC endpoint added: {}", url);
            Http::with_client(http_client.clone(), url.clone()).into_box_transport()
        })
        .collect();

    if transports.is_empty() {
        return Err(ChainError::ProviderInit {
            reason: "no RPC endpoints configured".to_string(),
        });
    }

    // One transport at a time: pure failover, ranked by latency and success rate.
    let fallback_layer = FallbackLayer::default().with_active_transport_count(NonZeroUsize::MIN);

    let transport = ServiceBuilder::new()
        .layer(fallback_layer)
        .service(transports);

    let client = RpcClient::builder().transport(transport, false);
    let provider = ProviderBuilder::new().connect_client(client);

    Ok(provider.erased())
}
