use std::{path::PathBuf, time::Duration};

use monitor_chain::{ChainConfig, ChainConfigRaw};
use monitor_http::{ExplorerConfig, ExplorerConfigRaw, PeerApiConfig, PeerApiConfigRaw};
use serde::{Deserialize, Serialize};

use crate::{
    config::ConfigError,
    logger::{LoggerConfig, TelemetryConfig},
};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigRaw {
    pub environment: String,
    /// Text file listing one node id per line.
    pub roster_path: PathBuf,
    /// Directory receiving one JSON snapshot per cycle.
    pub history_dir: PathBuf,
    pub monitor: MonitorConfigRaw,
    pub chain: ChainConfigRaw,
    pub peer_api: PeerApiConfigRaw,
    pub explorer: ExplorerConfigRaw,
    pub logger: LoggerConfig,
    pub telemetry: TelemetryConfig,
}

/// Cycle scheduling.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct MonitorConfigRaw {
    /// Sleep between the end of one cycle and the start of the next.
    pub interval_secs: u64,
    /// Delay between consecutive roster entries within a cycle.
    pub pacing_delay_ms: u64,
}

impl MonitorConfigRaw {
    pub(crate) fn resolve(self) -> Result<MonitorConfig, ConfigError> {
        if self.interval_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "monitor.interval_secs must be greater than 0".to_string(),
            ));
        }

        Ok(MonitorConfig {
            interval: Duration::from_secs(self.interval_secs),
            pacing_delay: Duration::from_millis(self.pacing_delay_ms),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MonitorConfig {
    pub interval: Duration,
    pub pacing_delay: Duration,
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub roster_path: PathBuf,
    pub history_dir: PathBuf,
    pub monitor: MonitorConfig,
    pub chain: ChainConfig,
    pub peer_api: PeerApiConfig,
    pub explorer: ExplorerConfig,
    pub logger: LoggerConfig,
    pub telemetry: TelemetryConfig,
}

impl ConfigRaw {
    pub(crate) fn resolve(self) -> Result<Config, ConfigError> {
        Ok(Config {
            roster_path: self.roster_path,
            history_dir: self.history_dir,
            monitor: self.monitor.resolve()?,
            chain: self.chain.resolve()?,
            peer_api: self.peer_api.resolve()?,
            explorer: self.explorer.resolve()?,
            logger: self.logger,
            telemetry: self.telemetry,
        })
    }
}
