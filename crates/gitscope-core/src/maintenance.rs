//! Periodic background sweeps

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Run `sweep` every `period` on the tokio runtime until `cancel` fires
///
/// The first sweep happens one full period after spawning.
pub(crate) fn spawn_sweeper<F>(
    name: &'static str,
    period: Duration,
    cancel: CancellationToken,
    mut sweep: F,
) -> JoinHandle<()>
where
    F: FnMut() -> usize + Send + 'static,
{
    let period = period.max(Duration::from_millis(1));
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(sweeper = name, "sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = sweep();
                    debug!(sweeper = name, removed, "sweep finished");
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_runs_until_cancelled() {
        let runs = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let counter = Arc::clone(&runs);
        let handle = spawn_sweeper("test", Duration::from_secs(60), cancel.clone(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            0
        });

        tokio::time::sleep(Duration::from_secs(150)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);

        cancel.cancel();
        handle.await.unwrap();
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
