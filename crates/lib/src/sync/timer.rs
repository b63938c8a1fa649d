//! Background save/load timer.

use std::sync::Arc;

use tokio::{
    sync::oneshot,
    task::{JoinError, JoinHandle},
    time::sleep,
};
use tracing::{Instrument, debug, info_span, trace};

use super::{FileSyncer, config::TimerAction};

/// Handle to a running timer started by [`FileSyncer::spawn_timer`].
///
/// Dropping the handle also stops the timer, at the end of its current sleep
/// at the latest.
#[derive(Debug)]
pub struct TimerHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Stops the timer and waits for it to finish.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        // The task may already be gone; waiting on it still reports panics.
        let _ = self.shutdown.send(());
        self.task.await
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl FileSyncer {
    /// Starts the background timer on the current Tokio runtime.
    ///
    /// Each cycle reads the current [`SyncConfig`](super::SyncConfig): with
    /// `auto_load` set it sleeps that long and loads, else with
    /// [`AutoSave::Every`](super::AutoSave::Every) it sleeps and saves,
    /// otherwise it checks again a second later. Failures are logged and the
    /// timer keeps running.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn_timer(self: &Arc<Self>) -> TimerHandle {
        let (shutdown, mut stop) = oneshot::channel();
        let syncer = Arc::clone(self);

        let task = tokio::spawn(
            async move {
                loop {
                    let action = syncer.config().timer_action();
                    let wait = match action {
                        TimerAction::Load(d) | TimerAction::Save(d) | TimerAction::Idle(d) => d,
                    };

                    tokio::select! {
                        _ = &mut stop => break,
                        _ = sleep(wait) => {}
                    }

                    let worker = Arc::clone(&syncer);
                    let outcome = match action {
                        TimerAction::Load(_) => {
                            tokio::task::spawn_blocking(move || worker.load()).await
                        }
                        TimerAction::Save(_) => {
                            tokio::task::spawn_blocking(move || worker.save()).await
                        }
                        TimerAction::Idle(_) => continue,
                    };
                    match outcome {
                        Ok(Ok(())) => trace!(?action, "Timer cycle completed"),
                        Ok(Err(e)) => debug!(?action, error = %e, "Timer cycle failed"),
                        Err(e) => debug!(?action, error = %e, "Timer cycle panicked"),
                    }
                }
                debug!("Timer stopped");
            }
            .instrument(info_span!("file_syncer_timer")),
        );

        TimerHandle { shutdown, task }
    }
}
