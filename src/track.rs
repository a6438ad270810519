//! # Publish the result of an async operation.
//!
//! [`track`] wraps one operation (a save, an upload, a settings change) with
//! result notifications on a channel, so every [`ResultButton`](crate::ResultButton)
//! bound to that channel follows it.
//!
//! ## Event flow
//! ```text
//! Success:
//!   publish Waiting → operation → outcome ok  → publish Success → follow-ups
//!
//! Failure:
//!   publish Waiting → operation → outcome bad → publish Failure
//!
//! Panic:
//!   publish Waiting → operation panics → publish Failure → resume panic
//! ```
//!
//! ## Rules
//! - Always publishes **exactly one** result after `Waiting`.
//! - Follow-ups are published only on success, in registration order,
//!   after `Success`.

use std::future::Future;
use std::panic::{AssertUnwindSafe, resume_unwind};

use futures::FutureExt;

use crate::bus::Channel;
use crate::notifications::Notification;

/// Result of an operation, as seen by [`track`].
pub trait Outcome {
    /// True if the operation should be reported as `Success`.
    fn is_success(&self) -> bool;
}

impl Outcome for bool {
    fn is_success(&self) -> bool {
        *self
    }
}

impl<T> Outcome for Option<T> {
    fn is_success(&self) -> bool {
        self.is_some()
    }
}

impl<T, E> Outcome for Result<T, E> {
    fn is_success(&self) -> bool {
        self.is_ok()
    }
}

/// Publishes `Waiting`, awaits `operation`, then publishes `Success` or `Failure`.
///
/// Returns the operation's outcome unchanged.
///
/// ## Example
/// ```rust
/// use resultvisor::{Bus, Notification};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let bus = Bus::new();
///     let channel = bus.get("about-save");
///
///     let saved = resultvisor::track(&channel, async { Ok::<_, String>(42) }).await;
///     assert_eq!(saved, Ok(42));
/// }
/// ```
pub async fn track<F>(channel: &Channel<Notification>, operation: F) -> F::Output
where
    F: Future,
    F::Output: Outcome,
{
    Tracker::new(channel.clone()).run(operation).await
}

/// [`track`] with follow-up notifications on success.
///
/// ## Example
/// ```rust
/// use resultvisor::{Notification, Tracker, names};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let tracker = Tracker::new(resultvisor::get("project-save"))
///     .then_publish(resultvisor::get(names::MEDIA_INPUT), Notification::Clear);
///
/// let ok = tracker.run(async { true }).await;
/// assert!(ok);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Tracker {
    channel: Channel<Notification>,
    follow_ups: Vec<(Channel<Notification>, Notification)>,
}

impl Tracker {
    /// Creates a tracker reporting on `channel`.
    pub fn new(channel: Channel<Notification>) -> Self {
        Self {
            channel,
            follow_ups: Vec::new(),
        }
    }

    /// Adds a notification published on `channel` after every success.
    pub fn then_publish(mut self, channel: Channel<Notification>, notification: Notification) -> Self {
        self.follow_ups.push((channel, notification));
        self
    }

    /// Channel the result notifications go to.
    pub fn channel(&self) -> &Channel<Notification> {
        &self.channel
    }

    /// Runs one operation, publishing its result.
    ///
    /// If `operation` panics, `Failure` is published and the panic resumes.
    pub async fn run<F>(&self, operation: F) -> F::Output
    where
        F: Future,
        F::Output: Outcome,
    {
        self.channel.publish(Notification::Waiting);

        let output = match AssertUnwindSafe(operation).catch_unwind().await {
            Ok(output) => output,
            Err(panic) => {
                tracing::warn!(channel = self.channel.name(), "tracked operation panicked");
                self.channel.publish(Notification::Failure);
                resume_unwind(panic);
            }
        };

        if output.is_success() {
            self.channel.publish(Notification::Success);
            for (channel, notification) in &self.follow_ups {
                channel.publish_ref(notification);
            }
        } else {
            self.channel.publish(Notification::Failure);
        }
        output
    }
}
