mod config;
mod error;
mod history;
mod logger;
mod periodic_tasks;
mod reconciler;
mod roster;
mod runtime;

use std::{path::PathBuf, sync::Arc};

use clap::{Arg, ArgAction, Command, value_parser};
pub use error::MonitorError;
use monitor_chain::ChainAddressResolver;
use monitor_http::{ActivityProbe, PeerStatusClient};

use crate::{
    history::HistoryStore, periodic_tasks::MonitoringTask, reconciler::NodeReconciler,
    roster::FileRoster,
};

pub async fn run() -> Result<(), MonitorError> {
    let matches = cli().get_matches();
    let config_path = matches.get_one::<PathBuf>("config").cloned();
    let once = matches.get_flag("once");

    let config = config::initialize_configuration(config_path.as_deref())?;
    logger::initialize(&config.logger, &config.telemetry);
    display_banner();

    let resolver = Arc::new(ChainAddressResolver::new(&config.chain)?);
    check_chain_connectivity(&resolver).await;

    let statuses = Arc::new(PeerStatusClient::new(config.peer_api.clone())?);
    let activity = Arc::new(ActivityProbe::new(&config.explorer)?);
    let reconciler = NodeReconciler::new(
        resolver,
        statuses,
        Arc::<ActivityProbe>::clone(&activity),
        config.monitor.pacing_delay,
    );

    let roster = FileRoster::new(config.roster_path.clone());
    let history = HistoryStore::new(config.history_dir.clone());
    tracing::info!(
        roster = %roster.path().display(),
        history = %history.dir().display(),
        interval_secs = config.monitor.interval.as_secs(),
        explorer_endpoints = activity.endpoint_count(),
        "Monitor configured"
    );

    let task = MonitoringTask::new(
        Arc::new(roster),
        reconciler,
        history,
        config.monitor.interval,
    );

    if once {
        task.run_cycle().await;
        return Ok(());
    }

    runtime::run(task).await;
    Ok(())
}

fn cli() -> Command {
    Command::new("swarm-node-monitor")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Periodically reconciles swarm node status, chain addresses and explorer activity")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Sets a custom config file (.toml format)"),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .action(ArgAction::SetTrue)
                .help("Runs a single monitoring cycle and exits"),
        )
}

/// Not fatal: the per-cycle contract call degrades on its own.
async fn check_chain_connectivity(resolver: &ChainAddressResolver) {
    match resolver.check_connectivity().await {
        Ok(block) => tracing::info!(
            chain_id = resolver.chain_id(),
            block,
            "Connected to chain RPC"
        ),
        Err(error) => tracing::warn!(
            chain_id = resolver.chain_id(),
            error = %error,
            "Chain RPC not reachable at startup; addresses will be unresolved until it recovers"
        ),
    }
}

fn display_banner() {
    tracing::info!("======================================================");
    tracing::info!(
        "             Swarm Node Monitor v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("======================================================");
    tracing::info!("Monitor is running in {} environment", config::current_env());
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn cli_parses_config_and_once() {
        let matches = cli()
            .try_get_matches_from(["swarm-node-monitor", "-c", "custom.toml", "--once"])
            .unwrap();

        assert_eq!(
            matches.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("custom.toml"))
        );
        assert!(matches.get_flag("once"));
    }

    #[test]
    fn cli_defaults_to_continuous_mode() {
        let matches = cli().try_get_matches_from(["swarm-node-monitor"]).unwrap();

        assert!(matches.get_one::<PathBuf>("config").is_none());
        assert!(!matches.get_flag("once"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }
}
