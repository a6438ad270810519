//! # Example: save_flow
//!
//! A save button following three operations on the same channel.
//!
//! Demonstrates how to:
//! - Bind a [`ResultButton`] to a named channel with custom labels and timings.
//! - Report operations with [`Tracker`], including a follow-up on success.
//! - Watch state changes and log channel traffic with [`LogWriter`].
//!
//! ## Flow
//! ```text
//! Tracker::run(ok)    ──► Waiting ─► Success ─► (media-input: Clear) ─► revert ─► Default
//! Tracker::run(err)   ──► Waiting ─► Failure ─► revert ─► Default
//! Tracker::run(slow)  ──► Waiting ─► stall ─► Timeout ─► revert ─► Default ─► Success
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=info,resultvisor=debug cargo run --example save_flow --features logging
//! ```

use std::time::Duration;

use resultvisor::{Labels, LogWriter, Notification, ResultButton, Timings, Tracker, names};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let save = resultvisor::get("project-save");
    let media = resultvisor::get(names::MEDIA_INPUT);
    let log_save = LogWriter::attach(&save);
    let log_media = LogWriter::attach(&media);

    // Short delays so the whole flow fits in a couple of seconds.
    let timings = Timings {
        stall: Duration::from_millis(300),
        success_revert: Duration::from_millis(200),
        failure_revert: Duration::from_millis(400),
        timeout_revert: Duration::from_millis(100),
    };
    let button = ResultButton::builder(save.clone())
        .labels(
            Labels::new("Save")
                .waiting("Saving...")
                .success("Saved")
                .failure("Save failed")
                .timeout("Still saving..."),
        )
        .timings(timings)
        .build();
    button.start()?;

    let mut states = button.watch();
    let printer = tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = *states.borrow_and_update();
            println!("[button] state={state} classes=\"{}\"", state.classes());
        }
    });

    let tracker = Tracker::new(save.clone()).then_publish(media.clone(), Notification::Clear);

    tracker
        .run(async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, anyhow::Error>("project-1")
        })
        .await?;
    println!("[button] title={:?}", button.current_title());
    tokio::time::sleep(Duration::from_millis(300)).await;

    let failed = tracker
        .run(async { Err::<(), _>(anyhow::anyhow!("disk full")) })
        .await;
    println!("[button] title={:?} err={failed:?}", button.current_title());
    tokio::time::sleep(Duration::from_millis(500)).await;

    tracker
        .run(async {
            tokio::time::sleep(Duration::from_millis(450)).await;
            true
        })
        .await;
    println!("[button] title={:?}", button.current_title());
    tokio::time::sleep(Duration::from_millis(300)).await;

    button.stop();
    log_save.cancel();
    log_media.cancel();
    printer.abort();
    Ok(())
}
