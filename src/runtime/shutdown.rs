use std::time::Duration;

use tokio::task::JoinHandle;

/// Upper bound for an in-flight cycle to finish once shutdown is requested.
pub(super) const MONITORING_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(600);

/// Resolves on SIGINT, or on SIGTERM where the platform has it.
pub(super) async fn wait_for_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => tracing::info!("Received SIGINT, initiating shutdown..."),
                    _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating shutdown..."),
                }
                return;
            }
            Err(error) => {
                tracing::warn!(error = %error, "Failed to install SIGTERM handler; only SIGINT stops the monitor");
            }
        }
    }

    match ctrl_c.await {
        Ok(()) => tracing::info!("Received SIGINT, initiating shutdown..."),
        Err(error) => tracing::error!(error = %error, "Failed to listen for SIGINT"),
    }
}

pub(super) async fn wait_for_shutdown_task(
    task: &str,
    timeout: Duration,
    handle: &mut JoinHandle<()>,
) {
    match tokio::time::timeout(timeout, &mut *handle).await {
        Ok(Ok(())) => {}
        Ok(Err(error)) => tracing::error!(
            task,
            error = ?error,
            "Shutdown task panicked"
        ),
        Err(_) => {
            tracing::warn!(
                task,
                timeout_secs = timeout.as_secs(),
                "Shutdown timeout reached, aborting task"
            );
            handle.abort();
            let _ = handle.await;
        }
    }
}
