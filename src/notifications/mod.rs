//! Notification data model.
//!
//! ## Contents
//! - [`Notification`], [`NotificationKind`] tagged values and their tags
//! - [`names`] well-known channel names shared by collaborators

pub mod names;
mod notification;

pub use notification::{API_ERROR_CODE, Notification, NotificationKind};
