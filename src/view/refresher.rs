//! Background periodic refresh
//!
//! A spawned task that re-fetches the list on a fixed interval for as long
//! as the view is mounted. Stopping it is explicit: a shutdown signal
//! followed by a join, so no tick can land after `stop` returns.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use super::controller::Shared;
use super::state::RefreshKind;
use crate::api::TaskApi;

/// Shortest period the refresher accepts
pub const MIN_PERIOD: Duration = Duration::from_secs(1);

/// Handle to a running refresher
pub(crate) struct PeriodicRefresh {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl PeriodicRefresh {
    /// Start refreshing every `period`; the first tick fires one period from now
    pub(crate) fn spawn<A: TaskApi + 'static>(shared: Arc<Shared<A>>, period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        let (shutdown, mut stop) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut stop => break,
                    _ = ticker.tick() => {
                        // Errors are logged inside the periodic transition.
                        let _ = shared.refresh(RefreshKind::Periodic).await;
                    }
                }
            }
            debug!("Periodic refresh stopped");
        });

        Self { shutdown, handle }
    }

    /// Signal shutdown and wait for the task to exit
    pub(crate) async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.handle.await {
            if !e.is_cancelled() {
                warn!("Periodic refresh task ended abnormally: {e}");
            }
        }
    }

    /// Cancel without waiting (used when the view is dropped while mounted)
    pub(crate) fn abort(self) {
        self.handle.abort();
    }
}
