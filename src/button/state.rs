//! # Visible state of a result button and its style tags.

use std::fmt;

use crate::notifications::Notification;

/// Tag present on every result button, marking it as an action control.
pub const ACTION_CLASS: &str = "btn";

/// Display state of a [`ResultButton`](crate::ResultButton).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResultState {
    /// Idle; nothing pending.
    #[default]
    Default,
    /// An operation is in flight.
    Waiting,
    /// The last operation succeeded.
    Success,
    /// The last operation failed.
    Failure,
    /// The last operation has been pending for too long.
    Timeout,
}

impl ResultState {
    /// State entered when `notification` arrives, or `None` if it is not a result tag.
    ///
    /// Result tags apply from every state.
    pub fn on_notification(n: &Notification) -> Option<ResultState> {
        match n {
            Notification::Waiting => Some(ResultState::Waiting),
            Notification::Success => Some(ResultState::Success),
            Notification::Failure => Some(ResultState::Failure),
            _ => None,
        }
    }

    /// Emphasis used to render this state.
    pub fn emphasis(self) -> Emphasis {
        match self {
            ResultState::Default | ResultState::Waiting => Emphasis::Primary,
            ResultState::Success => Emphasis::Success,
            ResultState::Failure => Emphasis::Danger,
            ResultState::Timeout => Emphasis::Warning,
        }
    }

    /// Style tags for this state.
    #[inline]
    pub fn classes(self) -> Classes {
        Classes {
            emphasis: self.emphasis(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(self) -> &'static str {
        match self {
            ResultState::Default => "default",
            ResultState::Waiting => "waiting",
            ResultState::Success => "success",
            ResultState::Failure => "failure",
            ResultState::Timeout => "timeout",
        }
    }
}

impl fmt::Display for ResultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// State-specific emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emphasis {
    /// Idle or pending (`btn-primary`).
    Primary,
    /// Operation succeeded (`btn-success`).
    Success,
    /// Operation failed (`btn-danger`).
    Danger,
    /// No result in time (`btn-warning`).
    Warning,
}

impl Emphasis {
    /// CSS class for this emphasis.
    pub fn as_class(self) -> &'static str {
        match self {
            Emphasis::Primary => "btn-primary",
            Emphasis::Success => "btn-success",
            Emphasis::Danger => "btn-danger",
            Emphasis::Warning => "btn-warning",
        }
    }
}

/// Style tag set of a result button: [`ACTION_CLASS`] plus exactly one emphasis tag.
///
/// Renders as a space-separated class string:
/// ```rust
/// use resultvisor::ResultState;
///
/// assert_eq!(ResultState::Failure.classes().to_string(), "btn btn-danger");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classes {
    emphasis: Emphasis,
}

impl Classes {
    /// The state-specific emphasis.
    pub fn emphasis(&self) -> Emphasis {
        self.emphasis
    }

    /// Iterates the tags, action tag first.
    pub fn iter(&self) -> std::array::IntoIter<&'static str, 2> {
        [ACTION_CLASS, self.emphasis.as_class()].into_iter()
    }

    /// True if `class` is one of the tags.
    pub fn contains(&self, class: &str) -> bool {
        self.iter().any(|c| c == class)
    }
}

impl fmt::Display for Classes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", ACTION_CLASS, self.emphasis.as_class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_state_has_action_tag_and_one_emphasis() {
        let all = [
            ResultState::Default,
            ResultState::Waiting,
            ResultState::Success,
            ResultState::Failure,
            ResultState::Timeout,
        ];
        let emphasis_tags = ["btn-primary", "btn-success", "btn-danger", "btn-warning"];

        for state in all {
            let classes = state.classes();
            assert!(classes.contains(ACTION_CLASS), "{state}");
            let count = emphasis_tags.iter().filter(|t| classes.contains(t)).count();
            assert_eq!(count, 1, "{state}: {classes}");
        }
    }

    #[test]
    fn test_emphasis_mapping() {
        assert_eq!(ResultState::Default.classes().to_string(), "btn btn-primary");
        assert_eq!(ResultState::Waiting.classes().to_string(), "btn btn-primary");
        assert_eq!(ResultState::Success.classes().to_string(), "btn btn-success");
        assert_eq!(ResultState::Failure.classes().to_string(), "btn btn-danger");
        assert_eq!(ResultState::Timeout.classes().to_string(), "btn btn-warning");
    }

    #[test]
    fn test_only_result_tags_transition() {
        assert_eq!(
            ResultState::on_notification(&Notification::Waiting),
            Some(ResultState::Waiting)
        );
        assert_eq!(
            ResultState::on_notification(&Notification::Failure),
            Some(ResultState::Failure)
        );
        assert_eq!(ResultState::on_notification(&Notification::Clear), None);
        assert_eq!(
            ResultState::on_notification(&Notification::error("x", 500)),
            None
        );
    }

    #[test]
    fn test_iter_order() {
        let tags: Vec<_> = ResultState::Timeout.classes().iter().collect();
        assert_eq!(tags, vec!["btn", "btn-warning"]);
    }
}
