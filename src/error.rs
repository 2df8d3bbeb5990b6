use thiserror::Error;

use crate::config::ConfigError;

/// Startup failures. Once the monitor is running, upstream failures are
/// reported per node and never surface here.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to initialize chain access: {0}")]
    Chain(#[from] monitor_chain::ChainError),

    #[error("Failed to initialize HTTP clients: {0}")]
    Http(#[from] monitor_http::HttpConfigError),
}
