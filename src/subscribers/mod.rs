//! # Built-in subscribers.
//!
//! Collaborators that listen on a channel and keep their own state, as opposed
//! to [`ResultButton`](crate::ResultButton), which drives a visual state.
//!
//! ```text
//! publish(Error{..}) ──► Channel("error") ──► ErrorMonitor (shown error, session flag)
//!                                        └──► LogWriter    (tracing, optional)
//! ```
//!
//! - [`ErrorMonitor`]: tracks the error an application-level dialog shows.
//! - `LogWriter` _(feature `logging`)_: logs channel traffic.

mod errors;
#[cfg(feature = "logging")]
mod log;

pub use errors::{ErrorMonitor, ShownError};
#[cfg(feature = "logging")]
pub use log::LogWriter;
