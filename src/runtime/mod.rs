mod shutdown;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::periodic_tasks::MonitoringTask;

/// Runs the monitoring loop until SIGINT or SIGTERM, then lets the current
/// cycle finish before returning.
pub(crate) async fn run(task: MonitoringTask) {
    let shutdown = CancellationToken::new();
    let mut monitoring_handle: JoinHandle<()> = tokio::task::spawn(task.run(shutdown.clone()));

    tokio::select! {
        _ = shutdown::wait_for_signal() => {}
        result = &mut monitoring_handle => {
            if let Err(error) = result {
                tracing::error!(error = ?error, "Monitoring task panicked");
            }
            return;
        }
    }

    tracing::info!("Shutting down gracefully...");
    shutdown.cancel();
    shutdown::wait_for_shutdown_task(
        "monitoring",
        shutdown::MONITORING_SHUTDOWN_TIMEOUT,
        &mut monitoring_handle,
    )
    .await;
    tracing::info!("Shutdown complete");
}
