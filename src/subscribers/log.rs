//! # LogWriter: channel traffic printer.
//!
//! Logs every notification on one channel through `tracing`. Use it for
//! debugging or demos; enabled by the `logging` feature.
//!
//! ## Example output
//! ```text
//! INFO  resultvisor: [waiting] channel="project-save"
//! INFO  resultvisor: [success] channel="project-save"
//! WARN  resultvisor: [failure] channel="project-save"
//! INFO  resultvisor: [clear] channel="media-input"
//! WARN  resultvisor: [error] channel="error" code=403 message="You are not logged in."
//! ```

use crate::bus::{Channel, Subscription};
use crate::notifications::Notification;

/// Notification writer subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogWriter;

impl LogWriter {
    /// Logs every future notification on `channel`.
    ///
    /// The returned subscription must be cancelled on teardown.
    pub fn attach(channel: &Channel<Notification>) -> Subscription {
        let name = channel.name().to_string();
        channel.subscribe(move |n| Self::write(&name, n))
    }

    fn write(channel: &str, n: &Notification) {
        match n {
            Notification::Failure => {
                tracing::warn!(channel, "[failure]");
            }
            Notification::Error { message, code } => {
                tracing::warn!(channel, code, message = &**message, "[error]");
            }
            _ => {
                tracing::info!(channel, "[{}]", n.kind().as_label());
            }
        }
    }
}
