//! # Channel registry: lookup-or-create by name.
//!
//! [`Bus`] maps channel names to [`Channel`] handles. The first lookup of a name
//! creates an empty channel; every later lookup returns a handle to the same one.
//! Channels are never removed.
//!
//! The process-wide instance is reached through [`get`] (and [`global`]), so two
//! components that share nothing but a channel name still meet on the same channel.
//!
//! ## Architecture
//! ```text
//! get("project-save") ──► global() ──► Bus::get()
//!                                        ├─ read lock: hit  ──► Channel (clone)
//!                                        └─ write lock: miss ──► insert empty ──► Channel (clone)
//! ```
//!
//! ## Example
//! ```rust
//! use resultvisor::Notification;
//!
//! let a = resultvisor::get("doc-registry-example");
//! let b = resultvisor::get("doc-registry-example");
//! assert!(a.same_channel(&b));
//!
//! let sub = b.subscribe(|n: &Notification| assert_eq!(*n, Notification::Refresh));
//! a.publish(Notification::Refresh);
//! sub.cancel();
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::RwLock;

use super::channel::Channel;
use crate::notifications::Notification;

/// Process-wide registry used by [`get`].
static GLOBAL: OnceLock<Bus<Notification>> = OnceLock::new();

/// Registry of named channels.
///
/// ### Rules
/// - `get(name)` never fails; a missing channel is created empty.
/// - The same name always resolves to the same channel instance.
/// - Channels live as long as the registry.
pub struct Bus<N = Notification> {
    channels: RwLock<HashMap<String, Channel<N>>>,
}

impl<N: 'static> Bus<N> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the channel for `name`, creating it on first use.
    pub fn get(&self, name: &str) -> Channel<N> {
        if let Some(ch) = self.channels.read().get(name) {
            return ch.clone();
        }

        let mut channels = self.channels.write();
        channels
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!(channel = name, "channel created");
                Channel::new(name)
            })
            .clone()
    }

    /// True if a channel with this name has been created.
    pub fn contains(&self, name: &str) -> bool {
        self.channels.read().contains_key(name)
    }

    /// Returns sorted list of channel names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Number of channels created so far.
    pub fn len(&self) -> usize {
        self.channels.read().len()
    }

    /// True if no channel has been created yet.
    pub fn is_empty(&self) -> bool {
        self.channels.read().is_empty()
    }
}

impl<N: 'static> Default for Bus<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the process-wide registry, initializing it on first call.
pub fn global() -> &'static Bus<Notification> {
    GLOBAL.get_or_init(Bus::new)
}

/// Returns the process-wide channel for `name`, creating it on first use.
pub fn get(name: &str) -> Channel<Notification> {
    global().get(name)
}
