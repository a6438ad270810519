//! # ResultButton: timed result-state machine bound to one channel.
//!
//! Translates `Waiting` / `Success` / `Failure` notifications into a visible
//! [`ResultState`] with a title and style tags, and reverts to `Default` on timers.
//!
//! ## Transitions
//! ```text
//!  any ── Waiting ──► Waiting  (cancel revert, arm stall = 5s)
//!  any ── Success ──► Success  (cancel stall,  arm revert = 3s)
//!  any ── Failure ──► Failure  (cancel stall,  arm revert = 7s)
//!
//!  Waiting ── stall expires ──► Timeout (arm revert = 1s)
//!  Success / Failure / Timeout ── revert expires ──► Default
//! ```
//!
//! ## Architecture
//! ```text
//! Channel::publish() ──► listener (sync) ──► Shared::on_notification()
//!                                                 │ lock Inner
//!                                                 ├─► enter(state) ──► watch::Sender
//!                                                 └─► arm(timer) ──► spawn_expiry()
//!                                                                       │ (tokio task)
//!                                   Shared::on_expired(kind, epoch) ◄───┘
//! ```
//!
//! ## Rules
//! - One stall timer and one revert timer per instance; arming cancels the previous one.
//! - Notifications other than the three result tags are ignored.
//! - After [`ResultButton::stop`] no notification is processed and no timer fires.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::Instant;

use super::config::Timings;
use super::labels::Labels;
use super::state::{Classes, ResultState};
use super::timer::{Timer, TimerKind, spawn_expiry};
use crate::bus::{self, Channel, Subscription};
use crate::error::ButtonError;
use crate::notifications::Notification;

struct Inner {
    state: ResultState,
    stall: Timer,
    revert: Timer,
    subscription: Option<Subscription>,
    runtime: Option<Handle>,
    stopped: bool,
}

impl Inner {
    fn timer(&mut self, kind: TimerKind) -> &mut Timer {
        match kind {
            TimerKind::Stall => &mut self.stall,
            TimerKind::Revert => &mut self.revert,
        }
    }
}

struct Shared {
    channel: Channel<Notification>,
    labels: Labels,
    timings: Timings,
    inner: Mutex<Inner>,
    state_tx: watch::Sender<ResultState>,
}

impl Shared {
    fn on_notification(self: &Arc<Self>, n: &Notification) {
        let Some(next) = ResultState::on_notification(n) else {
            return;
        };
        let mut inner = self.inner.lock();
        if inner.stopped {
            return;
        }

        match next {
            ResultState::Waiting => {
                inner.revert.cancel();
                self.enter(&mut inner, next);
                self.arm(&mut inner, TimerKind::Stall, self.timings.stall);
            }
            ResultState::Success | ResultState::Failure => {
                inner.stall.cancel();
                self.enter(&mut inner, next);
                if let Some(delay) = self.timings.revert_after(next) {
                    self.arm(&mut inner, TimerKind::Revert, delay);
                }
            }
            ResultState::Default | ResultState::Timeout => {}
        }
    }

    fn on_expired(self: &Arc<Self>, kind: TimerKind, epoch: u64) {
        let mut inner = self.inner.lock();
        if inner.stopped || !inner.timer(kind).fire(epoch) {
            return;
        }
        tracing::debug!(
            channel = self.channel.name(),
            timer = kind.as_label(),
            "timer expired"
        );

        match kind {
            TimerKind::Stall => {
                if inner.state != ResultState::Waiting {
                    return;
                }
                self.enter(&mut inner, ResultState::Timeout);
                self.arm(&mut inner, TimerKind::Revert, self.timings.timeout_revert);
            }
            TimerKind::Revert => {
                self.enter(&mut inner, ResultState::Default);
            }
        }
    }

    fn enter(&self, inner: &mut Inner, next: ResultState) {
        let prev = std::mem::replace(&mut inner.state, next);
        self.state_tx.send_replace(next);
        tracing::debug!(
            channel = self.channel.name(),
            from = %prev,
            to = %next,
            "state changed"
        );
    }

    fn arm(self: &Arc<Self>, inner: &mut Inner, kind: TimerKind, delay: Duration) {
        let Some(runtime) = inner.runtime.clone() else {
            return;
        };
        let (epoch, token) = inner.timer(kind).arm();
        let deadline = Instant::now() + delay;
        let weak: Weak<Shared> = Arc::downgrade(self);

        spawn_expiry(&runtime, token, deadline, move || {
            if let Some(shared) = weak.upgrade() {
                shared.on_expired(kind, epoch);
            }
        });
    }
}

/// Action control whose state follows the notifications of one channel.
///
/// ### Lifecycle
/// - [`ResultButton::start`] subscribes (call it on mount, inside a tokio runtime).
/// - [`ResultButton::stop`] cancels the subscription and both timers (call it on
///   unmount). Dropping the button also stops it.
///
/// ### Example
/// ```rust
/// use resultvisor::{Labels, Notification, ResultButton, ResultState};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), resultvisor::ButtonError> {
///     let button = ResultButton::new(
///         "doc-project-save",
///         Labels::new("Save").waiting("Saving").success("Saved"),
///     );
///     button.start()?;
///
///     resultvisor::get("doc-project-save").publish(Notification::Waiting);
///     assert_eq!(button.state(), ResultState::Waiting);
///     assert_eq!(button.current_title(), "Saving");
///
///     resultvisor::get("doc-project-save").publish(Notification::Success);
///     assert_eq!(button.current_classes().to_string(), "btn btn-success");
///
///     button.stop();
///     Ok(())
/// }
/// ```
pub struct ResultButton {
    shared: Arc<Shared>,
}

impl ResultButton {
    /// Creates a button bound to the process-wide channel `channel` with default timings.
    pub fn new(channel: &str, labels: Labels) -> Self {
        Self::builder(bus::get(channel)).labels(labels).build()
    }

    /// Starts building a button bound to `channel` (from any [`Bus`](crate::Bus)).
    pub fn builder(channel: Channel<Notification>) -> ResultButtonBuilder {
        ResultButtonBuilder {
            channel,
            labels: Labels::default(),
            timings: Timings::default(),
        }
    }

    /// Subscribes to the bound channel with both timers off.
    ///
    /// Idempotent while running. The current tokio runtime is captured to drive timers.
    ///
    /// # Errors
    /// - [`ButtonError::NoRuntime`] when called outside a tokio runtime.
    /// - [`ButtonError::Stopped`] when called after [`ResultButton::stop`].
    pub fn start(&self) -> Result<(), ButtonError> {
        let mut inner = self.shared.inner.lock();
        if inner.stopped {
            return Err(ButtonError::Stopped {
                channel: self.channel_name().to_string(),
            });
        }
        if inner.subscription.is_some() {
            return Ok(());
        }
        inner.runtime = Some(Handle::try_current().map_err(|_| ButtonError::NoRuntime)?);

        let weak = Arc::downgrade(&self.shared);
        inner.subscription = Some(self.shared.channel.subscribe_filtered(
            Notification::is_result,
            move |n| {
                if let Some(shared) = weak.upgrade() {
                    shared.on_notification(n);
                }
            },
        ));
        tracing::debug!(channel = self.channel_name(), "result button started");
        Ok(())
    }

    /// Cancels the subscription and both timers. Idempotent.
    ///
    /// The state stays frozen at its value at the time of the call.
    pub fn stop(&self) {
        let subscription = {
            let mut inner = self.shared.inner.lock();
            if inner.stopped {
                return;
            }
            inner.stopped = true;
            inner.stall.cancel();
            inner.revert.cancel();
            inner.subscription.take()
        };
        if let Some(sub) = subscription {
            sub.cancel();
        }
        tracing::debug!(channel = self.channel_name(), "result button stopped");
    }

    /// True between a successful `start()` and `stop()`.
    pub fn is_running(&self) -> bool {
        let inner = self.shared.inner.lock();
        !inner.stopped && inner.subscription.is_some()
    }

    /// Current state.
    pub fn state(&self) -> ResultState {
        self.shared.inner.lock().state
    }

    /// Style tags for the current state.
    pub fn current_classes(&self) -> Classes {
        self.state().classes()
    }

    /// Title configured for the current state (empty if missing).
    pub fn current_title(&self) -> String {
        self.shared.labels.title(self.state()).to_string()
    }

    /// Receiver that observes every state change.
    pub fn watch(&self) -> watch::Receiver<ResultState> {
        self.shared.state_tx.subscribe()
    }

    /// Name of the bound channel.
    pub fn channel_name(&self) -> &str {
        self.shared.channel.name()
    }

    /// Per-state titles.
    pub fn labels(&self) -> &Labels {
        &self.shared.labels
    }

    /// Delays of the stall and revert timers.
    pub fn timings(&self) -> Timings {
        self.shared.timings
    }

    #[cfg(test)]
    fn timers_armed(&self) -> (bool, bool) {
        let inner = self.shared.inner.lock();
        (inner.stall.is_armed(), inner.revert.is_armed())
    }
}

impl Drop for ResultButton {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for ResultButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultButton")
            .field("channel", &self.channel_name())
            .field("state", &self.state())
            .finish()
    }
}

/// Builder for [`ResultButton`].
pub struct ResultButtonBuilder {
    channel: Channel<Notification>,
    labels: Labels,
    timings: Timings,
}

impl ResultButtonBuilder {
    /// Sets the per-state titles.
    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Overrides the default delays.
    pub fn timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Builds the button in `Default` state, not yet subscribed.
    pub fn build(self) -> ResultButton {
        let (state_tx, _) = watch::channel(ResultState::Default);
        ResultButton {
            shared: Arc::new(Shared {
                channel: self.channel,
                labels: self.labels,
                timings: self.timings,
                inner: Mutex::new(Inner {
                    state: ResultState::Default,
                    stall: Timer::new(),
                    revert: Timer::new(),
                    subscription: None,
                    runtime: None,
                    stopped: false,
                }),
                state_tx,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::sleep;

    use super::*;
    use crate::bus::Bus;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn labels() -> Labels {
        Labels::new("Save")
            .waiting("Saving")
            .success("Saved")
            .failure("Failed")
            .timeout("Taking long")
    }

    fn started(bus: &Bus, name: &str) -> ResultButton {
        let button = ResultButton::builder(bus.get(name)).labels(labels()).build();
        button.start().expect("inside runtime");
        button
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_state() {
        let bus = Bus::new();
        let button = started(&bus, "save");

        assert_eq!(button.state(), ResultState::Default);
        assert_eq!(button.current_title(), "Save");
        assert_eq!(button.current_classes().to_string(), "btn btn-primary");
        assert!(button.is_running());
        assert_eq!(button.timers_armed(), (false, false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiting_then_success_never_times_out() {
        let bus = Bus::new();
        let ch = bus.get("save");
        let button = started(&bus, "save");

        ch.publish(Notification::Waiting);
        assert_eq!(button.state(), ResultState::Waiting);
        assert_eq!(button.timers_armed(), (true, false));

        sleep(ms(2000)).await;
        ch.publish(Notification::Success);
        assert_eq!(button.state(), ResultState::Success);
        assert_eq!(button.current_title(), "Saved");
        assert_eq!(button.timers_armed(), (false, true));

        sleep(ms(2999)).await;
        assert_eq!(button.state(), ResultState::Success);

        sleep(ms(2)).await;
        assert_eq!(button.state(), ResultState::Default);

        sleep(ms(10_000)).await;
        assert_eq!(button.state(), ResultState::Default);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiting_alone_times_out_then_reverts() {
        let bus = Bus::new();
        let ch = bus.get("save");
        let button = started(&bus, "save");

        ch.publish(Notification::Waiting);

        sleep(ms(4999)).await;
        assert_eq!(button.state(), ResultState::Waiting);

        sleep(ms(2)).await;
        assert_eq!(button.state(), ResultState::Timeout);
        assert_eq!(button.current_title(), "Taking long");
        assert!(button.current_classes().contains("btn-warning"));

        sleep(ms(997)).await;
        assert_eq!(button.state(), ResultState::Timeout);

        sleep(ms(3)).await;
        assert_eq!(button.state(), ResultState::Default);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_reverts_at_three_seconds() {
        let bus = Bus::new();
        let ch = bus.get("save");
        let button = started(&bus, "save");

        ch.publish(Notification::Success);
        sleep(ms(2999)).await;
        assert_eq!(button.state(), ResultState::Success);

        sleep(ms(2)).await;
        assert_eq!(button.state(), ResultState::Default);
        assert_eq!(button.timers_armed(), (false, false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_reverts_at_seven_seconds() {
        let bus = Bus::new();
        let ch = bus.get("save");
        let button = started(&bus, "save");

        ch.publish(Notification::Waiting);
        ch.publish(Notification::Failure);
        assert_eq!(button.current_classes().to_string(), "btn btn-danger");

        sleep(ms(6999)).await;
        assert_eq!(button.state(), ResultState::Failure);

        sleep(ms(2)).await;
        assert_eq!(button.state(), ResultState::Default);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_waiting_restarts_stall() {
        let bus = Bus::new();
        let ch = bus.get("save");
        let button = started(&bus, "save");

        ch.publish(Notification::Waiting);
        sleep(ms(3000)).await;
        ch.publish(Notification::Waiting);

        sleep(ms(2001)).await;
        assert_eq!(button.state(), ResultState::Waiting);

        sleep(ms(3000)).await;
        assert_eq!(button.state(), ResultState::Timeout);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiting_cancels_pending_revert() {
        let bus = Bus::new();
        let ch = bus.get("save");
        let button = started(&bus, "save");

        ch.publish(Notification::Success);
        sleep(ms(1000)).await;
        ch.publish(Notification::Waiting);
        assert_eq!(button.timers_armed(), (true, false));

        sleep(ms(2001)).await;
        assert_eq!(button.state(), ResultState::Waiting);

        sleep(ms(3000)).await;
        assert_eq!(button.state(), ResultState::Timeout);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_during_timeout_replaces_its_revert() {
        let bus = Bus::new();
        let ch = bus.get("save");
        let button = started(&bus, "save");

        ch.publish(Notification::Waiting);
        sleep(ms(5500)).await;
        assert_eq!(button.state(), ResultState::Timeout);

        ch.publish(Notification::Failure);
        sleep(ms(1000)).await;
        assert_eq!(button.state(), ResultState::Failure);

        sleep(ms(5999)).await;
        assert_eq!(button.state(), ResultState::Failure);

        sleep(ms(2)).await;
        assert_eq!(button.state(), ResultState::Default);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrecognized_notifications_are_ignored() {
        let bus = Bus::new();
        let ch = bus.get("save");
        let button = started(&bus, "save");

        ch.publish(Notification::Clear);
        ch.publish(Notification::Refresh);
        ch.publish(Notification::error("boom", 500));
        assert_eq!(button.state(), ResultState::Default);
        assert_eq!(button.timers_armed(), (false, false));

        ch.publish(Notification::Success);
        ch.publish(Notification::Clear);
        assert_eq!(button.state(), ResultState::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_final_state_follows_last_result_tag() {
        use Notification as N;
        use ResultState as S;

        let cases: Vec<(Vec<Notification>, ResultState)> = vec![
            (vec![], S::Default),
            (vec![N::Clear, N::Refresh], S::Default),
            (vec![N::Waiting], S::Waiting),
            (vec![N::Waiting, N::Success], S::Success),
            (vec![N::Waiting, N::Failure, N::Clear], S::Failure),
            (vec![N::Success, N::Waiting], S::Waiting),
            (vec![N::Failure, N::Success, N::Refresh], S::Success),
            (vec![N::Waiting, N::error("x", 401), N::Waiting], S::Waiting),
        ];

        for (i, (sequence, expected)) in cases.into_iter().enumerate() {
            let bus = Bus::new();
            let ch = bus.get("save");
            let button = started(&bus, "save");
            for n in sequence {
                ch.publish(n);
            }
            assert_eq!(button.state(), expected, "case {i}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_channels_are_isolated() {
        let bus = Bus::new();
        let a = started(&bus, "a");
        let b = started(&bus, "b");

        bus.get("a").publish(Notification::Waiting);
        assert_eq!(a.state(), ResultState::Waiting);
        assert_eq!(b.state(), ResultState::Default);

        sleep(ms(5001)).await;
        assert_eq!(a.state(), ResultState::Timeout);
        assert_eq!(b.state(), ResultState::Default);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_channel_drives_every_button() {
        let bus = Bus::new();
        let first = started(&bus, "settings-meta");
        let second = started(&bus, "settings-meta");

        bus.get("settings-meta").publish(Notification::Failure);
        assert_eq!(first.state(), ResultState::Failure);
        assert_eq!(second.state(), ResultState::Failure);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_state() {
        let bus = Bus::new();
        let ch = bus.get("save");
        let button = started(&bus, "save");

        ch.publish(Notification::Waiting);
        sleep(ms(1000)).await;
        button.stop();

        assert!(!button.is_running());
        assert_eq!(ch.subscriber_count(), 0);
        assert_eq!(button.timers_armed(), (false, false));

        ch.publish(Notification::Success);
        sleep(ms(20_000)).await;
        assert_eq!(button.state(), ResultState::Waiting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_after_success_cancels_revert() {
        let bus = Bus::new();
        let ch = bus.get("save");
        let button = started(&bus, "save");

        ch.publish(Notification::Success);
        button.stop();
        button.stop();

        sleep(ms(5000)).await;
        assert_eq!(button.state(), ResultState::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_stop_is_rejected() {
        let bus = Bus::new();
        let button = started(&bus, "save");
        button.stop();

        let err = button.start().unwrap_err();
        assert_eq!(
            err,
            ButtonError::Stopped {
                channel: "save".into()
            }
        );
        assert_eq!(err.as_label(), "button_stopped");
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_is_idempotent() {
        let bus = Bus::new();
        let button = started(&bus, "save");
        button.start().expect("second start");

        assert_eq!(bus.get("save").subscriber_count(), 1);
    }

    #[test]
    fn test_start_outside_runtime() {
        let bus = Bus::new();
        let button = ResultButton::builder(bus.get("save")).build();

        assert_eq!(button.start(), Err(ButtonError::NoRuntime));
        assert!(!button.is_running());
        assert_eq!(button.current_title(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_unsubscribes() {
        let bus = Bus::new();
        let ch = bus.get("save");
        {
            let _button = started(&bus, "save");
            assert_eq!(ch.subscriber_count(), 1);
        }
        assert_eq!(ch.subscriber_count(), 0);
        ch.publish(Notification::Waiting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_observes_transitions() {
        let bus = Bus::new();
        let ch = bus.get("save");
        let button = started(&bus, "save");
        let mut rx = button.watch();

        ch.publish(Notification::Success);
        rx.changed().await.expect("sender alive");
        assert_eq!(*rx.borrow_and_update(), ResultState::Success);

        rx.changed().await.expect("sender alive");
        assert_eq!(*rx.borrow_and_update(), ResultState::Default);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_timings() {
        let bus = Bus::new();
        let ch = bus.get("save");
        let timings = Timings {
            stall: ms(100),
            success_revert: ms(10),
            failure_revert: ms(20),
            timeout_revert: ms(30),
        };
        let button = ResultButton::builder(ch.clone())
            .labels(labels())
            .timings(timings)
            .build();
        button.start().expect("inside runtime");
        assert_eq!(button.timings(), timings);

        ch.publish(Notification::Waiting);
        sleep(ms(101)).await;
        assert_eq!(button.state(), ResultState::Timeout);
        sleep(ms(30)).await;
        assert_eq!(button.state(), ResultState::Default);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timings_fire_on_next_tick() {
        let bus = Bus::new();
        let ch = bus.get("save");
        let zero = Timings {
            stall: Duration::ZERO,
            success_revert: Duration::ZERO,
            failure_revert: Duration::ZERO,
            timeout_revert: Duration::ZERO,
        };
        let button = ResultButton::builder(ch.clone())
            .labels(labels())
            .timings(zero)
            .build();
        button.start().expect("inside runtime");

        ch.publish(Notification::Waiting);
        ch.publish(Notification::Success);
        assert_eq!(button.state(), ResultState::Success);

        sleep(ms(1)).await;
        assert_eq!(button.state(), ResultState::Default);
        assert_eq!(button.timers_armed(), (false, false));

        ch.publish(Notification::Waiting);
        sleep(ms(1)).await;
        assert_eq!(button.state(), ResultState::Default);
        assert_eq!(button.timers_armed(), (false, false));

        // Zero stall with the default revert keeps Timeout observable.
        let stalls = ResultButton::builder(bus.get("upload"))
            .labels(labels())
            .timings(Timings {
                stall: Duration::ZERO,
                ..Timings::default()
            })
            .build();
        stalls.start().expect("inside runtime");

        bus.get("upload").publish(Notification::Waiting);
        sleep(ms(1)).await;
        assert_eq!(stalls.state(), ResultState::Timeout);
        sleep(ms(1000)).await;
        assert_eq!(stalls.state(), ResultState::Default);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_stale_stall_never_overrides_result() {
        let bus = Bus::new();
        let ch = bus.get("save");
        let button = ResultButton::builder(ch.clone())
            .labels(labels())
            .timings(Timings {
                stall: ms(2),
                success_revert: Duration::from_secs(60),
                ..Timings::default()
            })
            .build();
        button.start().expect("inside runtime");

        for round in 0..200 {
            ch.publish(Notification::Waiting);
            std::thread::sleep(Duration::from_micros(1_900));
            ch.publish(Notification::Success);
            assert_eq!(button.state(), ResultState::Success, "round {round}");

            sleep(ms(3)).await;
            assert_eq!(button.state(), ResultState::Success, "round {round}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_global_channel_by_name() {
        let button = ResultButton::new("machine-test-global", labels());
        button.start().expect("inside runtime");

        bus::get("machine-test-global").publish(Notification::Failure);
        assert_eq!(button.state(), ResultState::Failure);
        assert_eq!(button.channel_name(), "machine-test-global");
        button.stop();
    }
}
