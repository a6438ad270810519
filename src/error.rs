//! Error types used by resultvisor.
//!
//! The bus itself is total: lookups create missing channels and publishing
//! never fails. The only fallible operation is starting a
//! [`ResultButton`](crate::ResultButton), which needs a tokio runtime for its
//! timers and cannot be restarted once stopped.

use thiserror::Error;

/// # Errors produced by a result button's lifecycle.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ButtonError {
    /// `start()` was called outside a tokio runtime; timers could not be scheduled.
    #[error("no tokio runtime available to drive result timers")]
    NoRuntime,

    /// `start()` was called after `stop()`.
    #[error("result button on channel {channel:?} was stopped and cannot be restarted")]
    Stopped {
        /// Name of the channel the button was bound to.
        channel: String,
    },
}

impl ButtonError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use resultvisor::ButtonError;
    ///
    /// let err = ButtonError::Stopped { channel: "project-save".into() };
    /// assert_eq!(err.as_label(), "button_stopped");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ButtonError::NoRuntime => "button_no_runtime",
            ButtonError::Stopped { .. } => "button_stopped",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ButtonError::NoRuntime => "no runtime".to_string(),
            ButtonError::Stopped { channel } => format!("stopped: channel={channel}"),
        }
    }
}
