//! # Notifications carried by the default bus.
//!
//! [`Notification`] is a tagged value: three result tags drive the
//! [`ResultButton`](crate::ResultButton), the rest are used by other
//! collaborators that share the same channels.
//!
//! [`NotificationKind`] is the payload-free tag. Subscribers filter on it
//! instead of inspecting payloads.
//!
//! ## Example
//! ```rust
//! use resultvisor::{Notification, NotificationKind};
//!
//! let n = Notification::for_status(403).expect("403 is reported");
//! assert_eq!(n.kind(), NotificationKind::Error);
//! assert!(n.is_session_error());
//!
//! assert!(Notification::for_status(404).is_none());
//! assert!(Notification::Waiting.is_result());
//! ```

use std::sync::Arc;

/// Error code used for errors reported by the API inside a successful response.
pub const API_ERROR_CODE: i32 = -1;

/// Tag of a [`Notification`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// An operation has started and its result is pending.
    Waiting,
    /// The pending operation succeeded.
    Success,
    /// The pending operation failed.
    Failure,
    /// Upload widgets should drop their buffered files.
    Clear,
    /// Site-level data changed and should be reloaded.
    Refresh,
    /// An error to be shown to the user.
    Error,
}

impl NotificationKind {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(self) -> &'static str {
        match self {
            NotificationKind::Waiting => "waiting",
            NotificationKind::Success => "success",
            NotificationKind::Failure => "failure",
            NotificationKind::Clear => "clear",
            NotificationKind::Refresh => "refresh",
            NotificationKind::Error => "error",
        }
    }
}

/// Immutable value published on a [`Channel`](crate::Channel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Waiting,
    Success,
    Failure,
    Clear,
    Refresh,
    /// User-facing error with the status code that produced it.
    Error { message: Arc<str>, code: i32 },
}

impl Notification {
    /// Creates an error notification.
    #[inline]
    pub fn error(message: impl Into<Arc<str>>, code: i32) -> Self {
        Notification::Error {
            message: message.into(),
            code,
        }
    }

    /// Creates an error reported by the API body rather than the HTTP status.
    #[inline]
    pub fn api_error(message: impl Into<Arc<str>>) -> Self {
        Self::error(message, API_ERROR_CODE)
    }

    /// Maps an HTTP status to the error shown to the user.
    ///
    /// Only `401`, `403` and `500` are reported; every other status yields `None`.
    pub fn for_status(status: u16) -> Option<Self> {
        let message = match status {
            401 => "You entered incorrect email or password.",
            403 => "You are not logged in.",
            500 => "Critical error occured.",
            _ => return None,
        };
        Some(Self::error(message, i32::from(status)))
    }

    /// Returns the tag of this notification.
    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::Waiting => NotificationKind::Waiting,
            Notification::Success => NotificationKind::Success,
            Notification::Failure => NotificationKind::Failure,
            Notification::Clear => NotificationKind::Clear,
            Notification::Refresh => NotificationKind::Refresh,
            Notification::Error { .. } => NotificationKind::Error,
        }
    }

    /// True for the three tags understood by the result state machine.
    #[inline]
    pub fn is_result(&self) -> bool {
        matches!(
            self,
            Notification::Waiting | Notification::Success | Notification::Failure
        )
    }

    /// True for errors that end the session (`401` and `403`).
    #[inline]
    pub fn is_session_error(&self) -> bool {
        matches!(self, Notification::Error { code: 401 | 403, .. })
    }

    /// Error message, if this is an error notification.
    pub fn message(&self) -> Option<&str> {
        match self {
            Notification::Error { message, .. } => Some(message.as_ref()),
            _ => None,
        }
    }

    /// Error code, if this is an error notification.
    pub fn code(&self) -> Option<i32> {
        match self {
            Notification::Error { code, .. } => Some(*code),
            _ => None,
        }
    }
}
