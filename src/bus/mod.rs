//! Named channel bus.
//!
//! ## Contents
//! - [`Channel`] multicast channel with synchronous, ordered delivery
//! - [`Subscription`] cancellable listener registration
//! - [`Bus`] registry of channels by name, plus the process-wide [`get`]
//!
//! ## Quick reference
//! - **Publishers**: forms and services (`Waiting`/`Success`/`Failure`, `Clear`,
//!   `Refresh`), the HTTP layer (`Error`), [`track`](crate::track).
//! - **Consumers**: [`ResultButton`](crate::ResultButton),
//!   [`ErrorMonitor`](crate::ErrorMonitor), `LogWriter`.

mod channel;
mod registry;

pub use channel::{Channel, Subscription};
pub use registry::{Bus, get, global};
