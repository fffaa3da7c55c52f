//! Scheduled Index Refresh
//!
//! A background task owned by the service lifecycle: started at boot, stopped at shutdown
//! through its handle. The first tick performs a regular (non-forced) build; later ticks force
//! a rebuild, since the schedule itself is the staleness signal.

use super::index::ExerciseIndex;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub struct IndexRefresher {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl IndexRefresher {
    /// Spawns the refresh loop and returns immediately.
    pub fn start(index: Arc<ExerciseIndex>, interval: Duration) -> Self {
        let (shutdown, mut shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            tracing::info!("Exercise index refresher started (every {:?})", interval);

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut first = true;

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        let outcome = index.rebuild(!first).await;
                        tracing::info!("Scheduled exercise index refresh: {:?}", outcome);
                        first = false;
                    }
                }
            }

            tracing::info!("Exercise index refresher stopped");
        });

        Self { shutdown, handle }
    }

    /// Signals the loop to stop and waits for it to exit.
    ///
    /// A rebuild already in progress is allowed to finish first.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.handle.await {
            tracing::error!("Exercise index refresher ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
