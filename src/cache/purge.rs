use std::sync::Weak;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use super::error::CacheError;

/// Anything the purge task can sweep.
pub(super) trait Purge: Send + Sync + 'static {
    fn purge_expired(&self) -> usize;
}

/// Handle to the background sweep of one cache.
///
/// The task only holds a weak reference to its target, so it also exits on
/// its own once the target is gone. Dropping the handle aborts the task.
pub(super) struct PurgeTask {
    handle: JoinHandle<()>,
}

impl PurgeTask {
    pub(super) fn spawn<P: Purge>(target: Weak<P>, period: Duration) -> Result<Self, CacheError> {
        let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;
        let handle = runtime.spawn(run(target, period));
        debug!(?period, "started cache purge task");
        Ok(Self { handle })
    }
}

impl Drop for PurgeTask {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("stopped cache purge task");
    }
}

async fn run<P: Purge>(target: Weak<P>, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let Some(strong) = target.upgrade() else {
            break;
        };
        let removed = strong.purge_expired();
        if removed > 0 {
            debug!(removed, "purged expired cache entries");
        }
    }
}
