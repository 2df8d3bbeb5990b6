//! Typed default configurations for each environment.
//!
//! Every environment gets a fully constructed [`ConfigRaw`] via [`config_for`];
//! `config.toml` and `--config` only need to carry overrides.

use std::path::PathBuf;

use monitor_chain::ChainConfigRaw;
use monitor_http::{ExplorerConfigRaw, PeerApiConfigRaw};

use super::{ConfigError, ConfigRaw, MonitorConfigRaw};
use crate::logger::{LogFormat, LoggerConfig, TelemetryConfig, TelemetryMetricsConfig};

pub(crate) const DEFAULT_ENVIRONMENT: &str = "testnet";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Returns the default [`ConfigRaw`] for the given environment name.
pub(crate) fn config_for(environment: &str) -> Result<ConfigRaw, ConfigError> {
    match environment {
        "development" => Ok(development()),
        "testnet" => Ok(testnet()),
        _ => Err(ConfigError::UnknownEnvironment(environment.to_string())),
    }
}

// ── Shared defaults ─────────────────────────────────────────────

fn chain() -> ChainConfigRaw {
    ChainConfigRaw {
        chain_id: 685685,
        rpc_endpoints: vec!["https://gensyn-testnet.g.alchemy.com/public".to_string()],
        contract_address: "0xFaD7C5e93f28257429569B854151A1B8DCD404c2".to_string(),
        request_timeout_ms: 10_000,
    }
}

fn peer_api() -> PeerApiConfigRaw {
    PeerApiConfigRaw {
        base_url: "https://dashboard.gensyn.ai/api/v1/peer".to_string(),
        timeout_ms: 10_000,
        user_agent: BROWSER_USER_AGENT.to_string(),
    }
}

fn explorer() -> ExplorerConfigRaw {
    ExplorerConfigRaw {
        origin: "https://gensyn-testnet.explorer.alchemy.com".to_string(),
        endpoints: [
            "{origin}/api/v2/addresses/{address}/internal-transactions",
            "{origin}/api/v1/addresses/{address}/internal-transactions",
            "{origin}/api/addresses/{address}/internal-transactions",
            "{origin}/api/v2/addresses/{address}/internal_transactions",
            "{origin}/api/v1/addresses/{address}/internal_transactions",
            "{origin}/api/v2/addresses/{address}/transactions?filter=internal",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        referer: "{origin}/address/{address}?tab=internal_txns".to_string(),
        timeout_ms: 10_000,
        user_agent: BROWSER_USER_AGENT.to_string(),
        accept_language: "en-US,en;q=0.5".to_string(),
    }
}

fn telemetry() -> TelemetryConfig {
    TelemetryConfig {
        metrics: TelemetryMetricsConfig {
            enabled: false,
            bind_address: "0.0.0.0:9464".to_string(),
        },
    }
}

// ── Environments ────────────────────────────────────────────────

fn testnet() -> ConfigRaw {
    ConfigRaw {
        environment: "testnet".to_string(),
        roster_path: PathBuf::from("id.txt"),
        history_dir: PathBuf::from("monitor_history"),
        monitor: MonitorConfigRaw {
            interval_secs: 30 * 60,
            pacing_delay_ms: 1_000,
        },
        chain: chain(),
        peer_api: peer_api(),
        explorer: explorer(),
        logger: LoggerConfig {
            level: "swarm_node_monitor=info,monitor_chain=info,monitor_http=info".to_string(),
            format: LogFormat::Pretty,
        },
        telemetry: telemetry(),
    }
}

fn development() -> ConfigRaw {
    ConfigRaw {
        environment: "development".to_string(),
        monitor: MonitorConfigRaw {
            interval_secs: 5 * 60,
            pacing_delay_ms: 1_000,
        },
        logger: LoggerConfig {
            level: "swarm_node_monitor=debug,monitor_chain=debug,monitor_http=debug".to_string(),
            format: LogFormat::Pretty,
        },
        ..testnet()
    }
}
