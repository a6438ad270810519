//! # resultvisor
//!
//! **Resultvisor** is a small notification bus with result-reporting state
//! machines on top of it.
//!
//! Named channels carry short [`Notification`]s between decoupled parts of an
//! application. A [`ResultButton`] bound to a channel turns the result
//! notifications of an operation into a visual state (style tags plus a
//! per-state title) with automatic timeout and revert.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  producer (save, upload, settings)        consumers
//!  ─────────────────────────────────        ─────────────────────────────
//!  track(&channel, op) ─┐
//!  channel.publish(n) ──┤
//!                       ▼
//!  ┌──────────────────────────────────┐
//!  │ Bus (name ─► Channel, insert-on- │
//!  │ miss; global() or owned)         │
//!  └──────────────┬───────────────────┘
//!                 ▼
//!  ┌──────────────────────────────────┐   sync, ordered   ┌──────────────┐
//!  │ Channel (listener list)          ├──────────────────►│ ResultButton │
//!  └──────────────────────────────────┘        │          ├──────────────┤
//!                                              ├─────────►│ ErrorMonitor │
//!                                              │          ├──────────────┤
//!                                              └─────────►│ LogWriter    │
//!                                                         └──────────────┘
//! ```
//!
//! ### Result state machine
//! ```text
//!              Waiting                    5000 ms
//! Default ───────────────► Waiting ─────────────────► Timeout ──┐
//!    ▲                      │  │                                │ 1000 ms
//!    │           Success    │  │ Failure                        │
//!    │   3000 ms ┌──────────┘  └──────────┐ 7000 ms            │
//!    │           ▼                        ▼                     │
//!    ├─────── Success                  Failure ───────┐         │
//!    │                                                │         │
//!    └────────────────────────────────────────────────┴─────────┘
//!
//! Any state: Waiting ─► Waiting, Success ─► Success, Failure ─► Failure.
//! Other tags are ignored.
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types                                   |
//! |-------------------|-----------------------------------------------------------|---------------------------------------------|
//! | **Bus**           | Named channels with synchronous, ordered delivery.        | [`Bus`], [`Channel`], [`Subscription`]      |
//! | **Notifications** | Result tags, housekeeping tags and user-facing errors.    | [`Notification`], [`NotificationKind`]      |
//! | **Result button** | State machine with stall timeout and auto-revert.         | [`ResultButton`], [`ResultState`], [`Classes`] |
//! | **Reporting**     | Publish the outcome of an async operation.                | [`track`], [`Tracker`], [`Outcome`]         |
//! | **Errors**        | Application-wide error display state.                     | [`ErrorMonitor`], [`ShownError`]            |
//! | **Configuration** | Labels and timer delays.                                  | [`Labels`], [`Timings`]                     |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use resultvisor::{Bus, Labels, ResultButton, ResultState};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bus = Bus::new();
//!     let channel = bus.get("project-save");
//!
//!     let button = ResultButton::builder(channel.clone())
//!         .labels(Labels::new("Save").waiting("Saving...").success("Saved"))
//!         .build();
//!     button.start()?;
//!
//!     resultvisor::track(&channel, async { Ok::<_, String>(()) }).await.ok();
//!
//!     assert_eq!(button.state(), ResultState::Success);
//!     assert_eq!(button.current_title(), "Saved");
//!     assert_eq!(button.current_classes().to_string(), "btn btn-success");
//!     Ok(())
//! }
//! ```
mod bus;
mod button;
mod error;
mod notifications;
mod subscribers;
mod track;

// ---- Public re-exports ----

pub use bus::{Bus, Channel, Subscription, get, global};
pub use button::{
    ACTION_CLASS, Classes, Emphasis, FAILURE_REVERT_AFTER, Labels, ResultButton,
    ResultButtonBuilder, ResultState, STALL_AFTER, SUCCESS_REVERT_AFTER, TIMEOUT_REVERT_AFTER,
    Timings,
};
pub use error::ButtonError;
pub use notifications::{API_ERROR_CODE, Notification, NotificationKind, names};
pub use subscribers::{ErrorMonitor, ShownError};
pub use track::{Outcome, Tracker, track};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
