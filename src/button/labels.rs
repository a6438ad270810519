//! # Per-state titles of a result button.

use super::state::ResultState;

/// Titles shown for each [`ResultState`].
///
/// A missing title renders as an empty string.
///
/// ## Example
/// ```rust
/// use resultvisor::{Labels, ResultState};
///
/// let labels = Labels::new("Save")
///     .waiting("Saving...")
///     .success("Saved")
///     .failure("Save failed");
///
/// assert_eq!(labels.title(ResultState::Waiting), "Saving...");
/// assert_eq!(labels.title(ResultState::Timeout), "");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Labels {
    /// Idle title.
    pub default: Option<String>,
    /// Shown while the operation is pending.
    pub waiting: Option<String>,
    /// Shown after a success.
    pub success: Option<String>,
    /// Shown after a failure.
    pub failure: Option<String>,
    /// Shown when no result arrived in time.
    pub timeout: Option<String>,
}

impl Labels {
    /// Labels with only the `Default` title set.
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: Some(default.into()),
            ..Self::default()
        }
    }

    /// Sets the `Waiting` title.
    pub fn waiting(mut self, title: impl Into<String>) -> Self {
        self.waiting = Some(title.into());
        self
    }

    /// Sets the `Success` title.
    pub fn success(mut self, title: impl Into<String>) -> Self {
        self.success = Some(title.into());
        self
    }

    /// Sets the `Failure` title.
    pub fn failure(mut self, title: impl Into<String>) -> Self {
        self.failure = Some(title.into());
        self
    }

    /// Sets the `Timeout` title.
    pub fn timeout(mut self, title: impl Into<String>) -> Self {
        self.timeout = Some(title.into());
        self
    }

    /// Title configured for `state`, or `""` when missing.
    pub fn title(&self, state: ResultState) -> &str {
        let slot = match state {
            ResultState::Default => &self.default,
            ResultState::Waiting => &self.waiting,
            ResultState::Success => &self.success,
            ResultState::Failure => &self.failure,
            ResultState::Timeout => &self.timeout,
        };
        slot.as_deref().unwrap_or_default()
    }
}
