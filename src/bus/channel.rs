//! # Named multicast channel.
//!
//! [`Channel`] delivers every published value to its listeners **synchronously**,
//! in subscription order, before `publish()` returns.
//!
//! ## Architecture
//! ```text
//! Publishers (many):                      Listeners (subscription order):
//!   form save ──┐                           ┌──► listener #1 (filter?) ──► callback
//!   http error ─┼──► Channel::publish() ────┼──► listener #2 (filter?) ──► callback
//!   timer     ──┘      (snapshot, no lock   └──► listener #N (filter?) ──► callback
//!                       held during calls)
//! ```
//!
//! ## Rules
//! - **Synchronous**: `publish()` returns after every listener has run.
//! - **No buffering**: a listener only sees values published after it subscribed.
//! - **Cancellation wins**: a listener cancelled mid-publish is not invoked
//!   for the remainder of that publish.
//! - **Panic isolation**: a panicking listener is logged and skipped;
//!   remaining listeners still run.
//! - **Re-entrancy**: listeners may publish, subscribe or cancel from inside
//!   a callback (the channel lock is not held while calling out).

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::notifications::{Notification, NotificationKind};

type Callback<N> = Arc<dyn Fn(&N) + Send + Sync>;
type Predicate<N> = Arc<dyn Fn(&N) -> bool + Send + Sync>;

/// One registered listener.
struct Entry<N> {
    id: u64,
    active: Arc<AtomicBool>,
    filter: Option<Predicate<N>>,
    callback: Callback<N>,
}

impl<N> Clone for Entry<N> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: Arc::clone(&self.active),
            filter: self.filter.clone(),
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<N> Entry<N> {
    fn accepts(&self, value: &N) -> bool {
        self.active.load(Ordering::Acquire) && self.filter.as_ref().is_none_or(|f| f(value))
    }
}

/// Listener list is copy-on-write: publishing clones one `Arc`, subscribe and
/// cancel swap in a new slice.
struct Inner<N> {
    name: Arc<str>,
    entries: Mutex<Arc<[Entry<N>]>>,
    next_id: AtomicU64,
}

/// Removal hook used by [`Subscription`] without knowing the value type.
trait Detach: Send + Sync {
    fn detach(&self, id: u64);
}

impl<N> Detach for Inner<N> {
    fn detach(&self, id: u64) {
        let mut entries = self.entries.lock();
        if entries.iter().any(|e| e.id == id) {
            *entries = entries.iter().filter(|e| e.id != id).cloned().collect();
        }
    }
}

/// Handle to a named channel.
///
/// Cheap to clone; every clone refers to the same listener list.
pub struct Channel<N = Notification> {
    inner: Arc<Inner<N>>,
}

impl<N> Clone for Channel<N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N> std::fmt::Debug for Channel<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.inner.name)
            .field("subscribers", &self.inner.entries.lock().len())
            .finish()
    }
}

impl<N: 'static> Channel<N> {
    /// Creates a standalone channel that is not registered anywhere.
    ///
    /// Use [`Bus::get`](crate::Bus::get) to obtain a shared, named one.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                name: name.into(),
                entries: Mutex::new(Arc::from(Vec::new())),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the channel name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Number of currently active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.entries.lock().len()
    }

    /// True if both handles point at the same channel instance.
    pub fn same_channel(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Publishes a value to every active listener, in subscription order.
    ///
    /// If there are no listeners, the value is dropped.
    pub fn publish(&self, value: N) {
        self.publish_ref(&value);
    }

    /// Publishes a borrowed value.
    pub fn publish_ref(&self, value: &N) {
        let snapshot = Arc::clone(&*self.inner.entries.lock());

        for entry in snapshot.iter() {
            if !entry.accepts(value) {
                continue;
            }
            let callback = &entry.callback;
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| callback(value))) {
                tracing::error!(
                    channel = %self.inner.name,
                    subscription = entry.id,
                    info = %panic_message(&*panic),
                    "listener panicked"
                );
            }
        }
    }

    /// Registers a listener for every future value.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&N) + Send + Sync + 'static,
    {
        self.register(None, Arc::new(listener))
    }

    /// Registers a listener for future values accepted by `predicate`.
    pub fn subscribe_filtered<P, F>(&self, predicate: P, listener: F) -> Subscription
    where
        P: Fn(&N) -> bool + Send + Sync + 'static,
        F: Fn(&N) + Send + Sync + 'static,
    {
        self.register(Some(Arc::new(predicate)), Arc::new(listener))
    }

    fn register(&self, filter: Option<Predicate<N>>, callback: Callback<N>) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let active = Arc::new(AtomicBool::new(true));

        let entry = Entry {
            id,
            active: Arc::clone(&active),
            filter,
            callback,
        };
        {
            let mut entries = self.inner.entries.lock();
            *entries = entries.iter().cloned().chain(std::iter::once(entry)).collect();
        }
        tracing::trace!(channel = %self.inner.name, subscription = id, "subscribed");

        let weak = Arc::downgrade(&self.inner);
        let channel: Weak<dyn Detach> = weak;
        Subscription {
            id,
            active,
            channel,
        }
    }
}

impl Channel<Notification> {
    /// Registers a listener for notifications whose tag is one of `kinds`.
    pub fn subscribe_kinds<F>(&self, kinds: &[NotificationKind], listener: F) -> Subscription
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        let kinds = kinds.to_vec();
        self.subscribe_filtered(move |n| kinds.contains(&n.kind()), listener)
    }
}

/// A listener's registration on a channel.
///
/// Dropping the handle does **not** cancel the subscription: the owner must call
/// [`Subscription::cancel`] on teardown.
#[must_use = "dropping a Subscription leaves the listener registered; keep it and call cancel()"]
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
    channel: Weak<dyn Detach>,
}

impl Subscription {
    /// Stops delivery to this listener. Idempotent.
    pub fn cancel(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(channel) = self.channel.upgrade() {
            channel.detach(self.id);
        }
        tracing::trace!(subscription = self.id, "cancelled");
    }

    /// True until [`Subscription::cancel`] is called.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
