use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{
    history::HistoryStore,
    periodic_tasks::runner::run_with_shutdown,
    reconciler::{CycleSummary, NodeReconciler},
    roster::RosterSource,
};

/// Roster, reconcile, persist; then sleep for the configured interval.
pub(crate) struct MonitoringTask {
    roster: Arc<dyn RosterSource>,
    reconciler: NodeReconciler,
    history: HistoryStore,
    interval: Duration,
}

impl MonitoringTask {
    pub(crate) fn new(
        roster: Arc<dyn RosterSource>,
        reconciler: NodeReconciler,
        history: HistoryStore,
        interval: Duration,
    ) -> Self {
        Self {
            roster,
            reconciler,
            history,
            interval,
        }
    }

    pub(crate) async fn run(self, shutdown: CancellationToken) {
        run_with_shutdown("monitoring", shutdown, || self.execute()).await;
    }

    async fn execute(&self) -> Duration {
        self.run_cycle().await;
        tracing::info!(
            next_cycle_in_secs = self.interval.as_secs(),
            "Waiting for next monitoring cycle"
        );
        self.interval
    }

    #[tracing::instrument(
        name = "periodic_tasks.monitoring",
        skip(self),
        fields(
            nodes = tracing::field::Empty,
            healthy = tracing::field::Empty,
            warning = tracing::field::Empty,
            stale = tracing::field::Empty,
            unknown = tracing::field::Empty,
        )
    )]
    pub(crate) async fn run_cycle(&self) -> CycleSummary {
        let started = Instant::now();
        let roster = self.roster.load().await;
        tracing::info!(nodes = roster.len(), "Starting monitoring cycle");

        let records = self.reconciler.reconcile(&roster).await;
        let summary = CycleSummary::from_records(&records);

        let span = tracing::Span::current();
        span.record("nodes", summary.nodes);
        span.record("healthy", summary.healthy);
        span.record("warning", summary.warning);
        span.record("stale", summary.stale);
        span.record("unknown", summary.unknown);

        match self.history.save(&records, Utc::now()).await {
            Ok(path) => {
                monitor_observability::record_history_write("ok");
                tracing::debug!(path = %path.display(), "History snapshot written");
            }
            Err(error) => {
                monitor_observability::record_history_write("error");
                tracing::error!(error = %error, "Failed to write history snapshot");
            }
        }

        summary.record_metrics();
        monitor_observability::record_cycle_run("ok", summary.nodes, started.elapsed());
        tracing::info!(
            nodes = summary.nodes,
            online = summary.online,
            with_address = summary.with_address,
            healthy = summary.healthy,
            warning = summary.warning,
            stale = summary.stale,
            unknown = summary.unknown,
            "Monitoring cycle complete"
        );

        summary
    }
}
