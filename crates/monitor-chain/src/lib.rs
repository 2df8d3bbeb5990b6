mod config;
mod config_error;
mod contracts;
mod error;
mod provider;
mod resolver;

pub use alloy::primitives::Address;
pub use config::{ChainConfig, ChainConfigRaw};
pub use config_error::ConfigError;
pub use error::ChainError;
pub use resolver::{AddressResolution, ChainAddressResolver, ResolutionOutcome, align_addresses};
