//! # Timer settings of a result button.
//!
//! Provides [`Timings`], the delays behind the two auto-transitions:
//! - **stall**: `Waiting` → `Timeout` when no result arrives in time;
//! - **revert**: `Success` / `Failure` / `Timeout` → `Default`.
//!
//! ## Sentinel values
//! - `Duration::ZERO` fires on the next timer tick (the state is still shown
//!   until the runtime polls the timer).

use std::time::Duration;

use super::state::ResultState;

/// Time spent in `Waiting` before switching to `Timeout`.
pub const STALL_AFTER: Duration = Duration::from_millis(5000);
/// Time `Success` stays visible.
pub const SUCCESS_REVERT_AFTER: Duration = Duration::from_millis(3000);
/// Time `Failure` stays visible.
pub const FAILURE_REVERT_AFTER: Duration = Duration::from_millis(7000);
/// Time `Timeout` stays visible.
pub const TIMEOUT_REVERT_AFTER: Duration = Duration::from_millis(1000);

/// Delays used by a [`ResultButton`](crate::ResultButton).
///
/// ## Field semantics
/// - `stall`: armed on every `Waiting`; expiry moves `Waiting` → `Timeout`
/// - `success_revert`: armed on `Success`
/// - `failure_revert`: armed on `Failure`
/// - `timeout_revert`: armed on entering `Timeout`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    pub stall: Duration,
    pub success_revert: Duration,
    pub failure_revert: Duration,
    pub timeout_revert: Duration,
}

impl Timings {
    /// Revert delay armed when entering `state`.
    ///
    /// - `None` → the state does not revert on its own (`Default`, `Waiting`)
    #[inline]
    pub fn revert_after(&self, state: ResultState) -> Option<Duration> {
        match state {
            ResultState::Success => Some(self.success_revert),
            ResultState::Failure => Some(self.failure_revert),
            ResultState::Timeout => Some(self.timeout_revert),
            ResultState::Default | ResultState::Waiting => None,
        }
    }
}

impl Default for Timings {
    /// Default delays:
    ///
    /// - `stall = 5s`
    /// - `success_revert = 3s`
    /// - `failure_revert = 7s`
    /// - `timeout_revert = 1s`
    fn default() -> Self {
        Self {
            stall: STALL_AFTER,
            success_revert: SUCCESS_REVERT_AFTER,
            failure_revert: FAILURE_REVERT_AFTER,
            timeout_revert: TIMEOUT_REVERT_AFTER,
        }
    }
}
