//! Tokio task that runs timeline steps as they fall due.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::{task::JoinHandle, time};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::Engine;

/// Engine shared between the driver and host event handlers.
pub type SharedEngine = Arc<Mutex<Engine>>;

/// Run due steps until `cancel` fires. Sleeps until the next deadline, or
/// until the engine signals that new steps were queued.
pub async fn run(engine: SharedEngine, cancel: CancellationToken) {
    let wake = engine.lock().waker();
    loop {
        let deadline = {
            let mut e = engine.lock();
            e.run_due();
            e.next_deadline()
        };
        trace!(?deadline, "driver_wait");
        match deadline {
            Some(at) => {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = time::sleep_until(at) => {}
                    _ = wake.notified() => {}
                }
            }
            None => {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = wake.notified() => {}
                }
            }
        }
    }
    trace!("driver_stopped");
}

/// Spawn [`run`] on the current runtime.
pub fn spawn(engine: SharedEngine, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(run(engine, cancel))
}
