//! Channel names used across the admin front-end.
//!
//! Result buttons use per-form names chosen by the form itself
//! (e.g. `"project-save"`); these are the shared ones.

/// User-facing errors (`Notification::Error`).
pub const ERROR: &str = "error";

/// Site metadata changed (`Notification::Refresh`).
pub const SITE: &str = "site";

/// Upload widgets (`Notification::Clear`).
pub const MEDIA_INPUT: &str = "media-input";
