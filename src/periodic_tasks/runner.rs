use std::{future::Future, time::Duration};

use tokio_util::sync::CancellationToken;

/// Runs `run_once` immediately, then again after each delay it returns.
///
/// A running iteration is never interrupted; cancellation is observed while
/// sleeping between iterations.
pub(crate) async fn run_with_shutdown<F, Fut>(
    task_name: &'static str,
    shutdown: CancellationToken,
    mut run_once: F,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = Duration>,
{
    while !shutdown.is_cancelled() {
        let delay = run_once().await;
        tracing::debug!(
            task = task_name,
            next_run_in_secs = delay.as_secs(),
            "Periodic task iteration finished"
        );
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shutdown.cancelled() => break,
        }
    }
    tracing::info!(task = task_name, "Periodic task shutting down");
}
