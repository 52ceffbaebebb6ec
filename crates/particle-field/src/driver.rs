//! Periodic driver task for the animator.
//!
//! The animator itself is a passive state machine; this driver is the
//! cancellable scheduler that ticks it once per frame interval. Pause
//! and resume go through the animator directly (a paused animator makes
//! `tick` a no-op), so the driver only ever needs to run or shut down.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::animator::Animator;

/// A running frame loop over a shared animator.
pub struct AnimationDriver {
    shutdown: broadcast::Sender<()>,
    handle: JoinHandle<()>,
}

impl AnimationDriver {
    /// Spawn the frame loop, ticking `animator` every `frame_interval`.
    ///
    /// Ticks that fall behind are skipped rather than bursted, so a slow
    /// frame never causes a catch-up stampede.
    pub fn spawn(animator: Arc<Mutex<Animator>>, frame_interval: Duration) -> Self {
        let (shutdown, mut shutdown_rx) = broadcast::channel(1);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(frame_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        animator.lock().await.tick();
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("Animation driver shutting down");
                        break;
                    }
                }
            }
        });

        Self { shutdown, handle }
    }

    /// Signal shutdown and wait for the loop to exit.
    pub async fn stop(self) {
        // The receiver may already be gone if the task panicked
        let _ = self.shutdown.send(());
        if let Err(e) = self.handle.await {
            if !e.is_cancelled() {
                warn!(error = %e, "Animation driver task failed");
            }
        }
    }

    /// Whether the loop task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
