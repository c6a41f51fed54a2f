//! The timeout scheduler seam.
//!
//! Each phase entry arms exactly one soon/hard timer pair bound to the
//! phase's epoch. Entering a new phase cancels the previous pair first; a
//! timer that was already queued to fire when it got cancelled still carries
//! its old epoch, so the engine drops it as stale. That makes cancellation
//! race-free without locking.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::phase::TimeoutKind;
use crate::engine::runtime::EngineEvent;

/// Arms and cancels the delayed callbacks for the active phase.
pub trait TimerScheduler: Send {
    /// Arm the soon/hard pair for the phase instance identified by `epoch`.
    fn arm(&mut self, epoch: u64, soon: Duration, hard: Duration);

    /// Cancel every timer armed for the previous phase instance.
    fn cancel(&mut self);
}

/// Production scheduler: one tokio task per timer, racing the phase's
/// cancellation token against the delay, delivering into the engine queue.
pub struct TokioScheduler {
    tx: tokio::sync::mpsc::Sender<EngineEvent>,
    token: CancellationToken,
}

impl TokioScheduler {
    pub fn new(tx: tokio::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self {
            tx,
            token: CancellationToken::new(),
        }
    }
}

impl TimerScheduler for TokioScheduler {
    fn arm(&mut self, epoch: u64, soon: Duration, hard: Duration) {
        for (kind, delay) in [(TimeoutKind::Soon, soon), (TimeoutKind::Hard, hard)] {
            let tx = self.tx.clone();
            let token = self.token.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!(epoch, ?kind, "timer cancelled");
                    }
                    _ = tokio::time::sleep(delay) => {
                        // The receiver may already be gone during shutdown.
                        let _ = tx.send(EngineEvent::Timeout { epoch, kind }).await;
                    }
                }
            });
        }
    }

    fn cancel(&mut self) {
        self.token.cancel();
        self.token = CancellationToken::new();
    }
}
