//! # Example: error_monitor
//!
//! Application-wide error display fed by HTTP statuses and API errors.
//!
//! Demonstrates how to:
//! - Map HTTP statuses to user-facing errors with [`Notification::for_status`].
//! - Show only the first error until it is dismissed, with [`ErrorMonitor`].
//! - React to an expired session (401/403).
//!
//! ## Flow
//! ```text
//! status 500 ──► Error{500}  ──► shown
//! API error  ──► Error{-1}   ──► suppressed (500 still shown)
//! dismiss()
//! status 401 ──► Error{401}  ──► shown, session expired ──► "log out"
//! status 404 ──► (no notification)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example error_monitor
//! ```

use resultvisor::{ErrorMonitor, Notification, names};

fn report_status(status: u16) {
    match Notification::for_status(status) {
        Some(n) => resultvisor::get(names::ERROR).publish(n),
        None => println!("[http] status={status} not reported"),
    }
}

fn main() -> anyhow::Result<()> {
    let errors = resultvisor::get(names::ERROR);
    let monitor = ErrorMonitor::attach(&errors);

    report_status(500);
    errors.publish(Notification::api_error("Project not found"));
    println!("[dialog] showing={:?} received={}", monitor.current(), monitor.received());

    if let Some(dismissed) = monitor.dismiss() {
        println!("[dialog] dismissed code={}", dismissed.code);
    }

    report_status(401);
    println!("[dialog] showing={:?}", monitor.current());
    if monitor.take_session_expired() {
        println!("[session] expired, logging out");
    }

    report_status(404);
    anyhow::ensure!(monitor.received() == 3, "expected three errors");

    monitor.detach();
    Ok(())
}
