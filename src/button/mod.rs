//! Result state machine.
//!
//! The only public type with behaviour here is [`ResultButton`]; the rest are
//! its inputs (labels, timings) and outputs (state, style tags).
//!
//! Internal modules:
//! - [`machine`]: the state machine, its lifecycle and timer wiring;
//! - [`timer`]: re-armable cancellable one-shot timers;
//! - [`state`]: states and their style tags;
//! - [`labels`]: per-state titles;
//! - [`config`]: delays of the two auto-transitions.

mod config;
mod labels;
mod machine;
mod state;
mod timer;

pub use config::{
    FAILURE_REVERT_AFTER, STALL_AFTER, SUCCESS_REVERT_AFTER, TIMEOUT_REVERT_AFTER, Timings,
};
pub use labels::Labels;
pub use machine::{ResultButton, ResultButtonBuilder};
pub use state::{ACTION_CLASS, Classes, Emphasis, ResultState};
