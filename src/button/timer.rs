//! # Re-armable, cancellable one-shot timers.
//!
//! A result button owns exactly two timers (stall and revert). Arming a timer
//! always cancels the previous instance of the same timer, so the last
//! notification wins.
//!
//! ## Rules
//! - Each arming gets a new **epoch**; expiry is honored only if its epoch is
//!   still the armed one (checked under the owner's lock).
//! - Cancellation fires the instance's [`CancellationToken`], which ends the
//!   sleeping task early.
//! - A superseded or cancelled timer never reaches the owner, even if its sleep
//!   completed concurrently with the cancellation.

use tokio::runtime::Handle;
use tokio::select;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

/// Which of the two timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerKind {
    /// `Waiting` → `Timeout`.
    Stall,
    /// `Success` / `Failure` / `Timeout` → `Default`.
    Revert,
}

impl TimerKind {
    pub(crate) fn as_label(self) -> &'static str {
        match self {
            TimerKind::Stall => "stall",
            TimerKind::Revert => "revert",
        }
    }
}

struct Armed {
    epoch: u64,
    token: CancellationToken,
}

/// State of one named timer.
pub(crate) struct Timer {
    epoch: u64,
    armed: Option<Armed>,
}

impl Timer {
    pub(crate) fn new() -> Self {
        Self {
            epoch: 0,
            armed: None,
        }
    }

    /// Cancels any previous instance and returns the epoch and token of the new one.
    pub(crate) fn arm(&mut self) -> (u64, CancellationToken) {
        self.cancel();
        self.epoch += 1;
        let token = CancellationToken::new();
        self.armed = Some(Armed {
            epoch: self.epoch,
            token: token.clone(),
        });
        (self.epoch, token)
    }

    /// Cancels the armed instance, if any.
    pub(crate) fn cancel(&mut self) {
        if let Some(armed) = self.armed.take() {
            armed.token.cancel();
        }
    }

    /// Consumes the armed instance if `epoch` is still current.
    ///
    /// Returns `false` for stale or cancelled instances.
    pub(crate) fn fire(&mut self, epoch: u64) -> bool {
        match &self.armed {
            Some(armed) if armed.epoch == epoch => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

/// Spawns a task on `runtime` that calls `on_expire` at `deadline` unless `token` is cancelled first.
pub(crate) fn spawn_expiry<F>(
    runtime: &Handle,
    token: CancellationToken,
    deadline: Instant,
    on_expire: F,
) where
    F: FnOnce() + Send + 'static,
{
    runtime.spawn(async move {
        select! {
            biased;
            _ = token.cancelled() => {}
            _ = time::sleep_until(deadline) => on_expire(),
        }
    });
}
