//! # ErrorMonitor: application-wide error display state.
//!
//! Listens to `Error` notifications on one channel (usually
//! [`names::ERROR`](crate::names::ERROR)) and keeps what a top-level error
//! dialog needs: the error being shown, and whether the session has expired.
//!
//! ## Rules
//! - At most **one** error is shown; while it is shown, later errors are counted
//!   but do not replace it. [`ErrorMonitor::dismiss`] frees the slot.
//! - A session error (401/403) raises the session-expired flag whether or not
//!   it was shown; [`ErrorMonitor::take_session_expired`] consumes the flag.
//! - Non-error notifications on the channel are ignored.
//!
//! ```text
//! Error{..} ──► received += 1
//!                 ├─ no error shown?   ──► shown = Error
//!                 └─ 401 / 403?        ──► session_expired = true
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use crate::bus::{Channel, Subscription};
use crate::notifications::{Notification, NotificationKind};

/// Error currently on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownError {
    /// Human-readable description.
    pub message: Arc<str>,
    /// HTTP status, or [`API_ERROR_CODE`](crate::API_ERROR_CODE) for application errors.
    pub code: i32,
}

#[derive(Default)]
struct State {
    shown: Option<ShownError>,
    session_expired: bool,
    received: u64,
}

impl State {
    fn record(&mut self, notification: &Notification) {
        let Notification::Error { message, code } = notification else {
            return;
        };
        self.received += 1;

        if notification.is_session_error() {
            self.session_expired = true;
        }
        if self.shown.is_none() {
            self.shown = Some(ShownError {
                message: Arc::clone(message),
                code: *code,
            });
        } else {
            tracing::debug!(code, "error suppressed while another is shown");
        }
    }
}

/// Subscriber that tracks the error to display.
///
/// ## Example
/// ```rust
/// use resultvisor::{Bus, ErrorMonitor, Notification, names};
///
/// let bus = Bus::new();
/// let errors = bus.get(names::ERROR);
/// let monitor = ErrorMonitor::attach(&errors);
///
/// errors.publish(Notification::for_status(401).unwrap());
/// assert_eq!(monitor.current().unwrap().code, 401);
/// assert!(monitor.take_session_expired());
/// assert!(!monitor.take_session_expired());
/// ```
pub struct ErrorMonitor {
    channel: Arc<str>,
    state: Arc<Mutex<State>>,
    subscription: Mutex<Option<Subscription>>,
}

impl ErrorMonitor {
    /// Subscribes to `Error` notifications on `channel`.
    pub fn attach(channel: &Channel<Notification>) -> Self {
        let state = Arc::new(Mutex::new(State::default()));
        let sink = Arc::clone(&state);
        let subscription = channel.subscribe_kinds(&[NotificationKind::Error], move |n| {
            sink.lock().record(n);
        });

        Self {
            channel: Arc::from(channel.name()),
            state,
            subscription: Mutex::new(Some(subscription)),
        }
    }

    /// Name of the watched channel.
    pub fn channel_name(&self) -> &str {
        &self.channel
    }

    /// The error being shown, if any.
    pub fn current(&self) -> Option<ShownError> {
        self.state.lock().shown.clone()
    }

    /// Clears the shown error and returns it.
    pub fn dismiss(&self) -> Option<ShownError> {
        self.state.lock().shown.take()
    }

    /// Whether a session error has been seen and not yet taken.
    pub fn session_expired(&self) -> bool {
        self.state.lock().session_expired
    }

    /// Reads and clears the session-expired flag.
    pub fn take_session_expired(&self) -> bool {
        std::mem::take(&mut self.state.lock().session_expired)
    }

    /// Number of errors seen since attaching.
    pub fn received(&self) -> u64 {
        self.state.lock().received
    }

    /// Whether the monitor still listens to its channel.
    pub fn is_attached(&self) -> bool {
        self.subscription.lock().is_some()
    }

    /// Stops listening. Idempotent; state collected so far is kept.
    pub fn detach(&self) {
        let subscription = self.subscription.lock().take();
        if let Some(subscription) = subscription {
            subscription.cancel();
        }
    }
}

impl Drop for ErrorMonitor {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for ErrorMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ErrorMonitor")
            .field("channel", &self.channel)
            .field("shown", &state.shown)
            .field("session_expired", &state.session_expired)
            .field("received", &state.received)
            .finish()
    }
}
