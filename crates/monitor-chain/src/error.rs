use alloy::{
    contract::Error as ContractError,
    transports::{RpcError, TransportErrorKind},
};

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Contract call failed: {0}")]
    Contract(#[from] ContractError),

    #[error("RPC request failed: {0}")]
    Rpc(#[from] RpcError<TransportErrorKind>),

    #[error("Provider initialization failed: {reason}")]
    ProviderInit { reason: String },
}

impl ChainError {
    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ChainError::Contract(ContractError::TransportError(_)) => "transport",
            ChainError::Contract(ContractError::AbiError(_))
            | ChainError::Contract(ContractError::ZeroData(..)) => "abi",
            ChainError::Contract(_) => "contract",
            ChainError::Rpc(_) => "rpc",
            ChainError::ProviderInit { .. } => "provider_init",
        }
    }
}
