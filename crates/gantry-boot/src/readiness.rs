//! Worker readiness waiting.
//!
//! Module runtimes spin their background workers up asynchronously after the
//! factory resolves; invoking the entry point before they are up aborts the
//! call. The wait is deliberately lossy: runtimes that never populate the
//! readiness list must not deadlock the bootstrap, so the ceiling is
//! tolerated and logged rather than raised.

use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use gantry_sdk::ModuleRuntime;

use crate::device::DeviceClass;
use crate::options::BootOptions;

/// Settle, then poll the worker readiness list until every entry reports
/// loaded or the wait ceiling elapses.
pub async fn wait_for_workers<R>(runtime: &R, class: DeviceClass, options: &BootOptions)
where
    R: ModuleRuntime,
{
    let settle = options.settle_delay(class);
    debug!(settle_ms = settle.as_millis() as u64, ?class, "letting the runtime settle");
    sleep(settle).await;

    let Some(mut pool) = runtime.worker_pool() else {
        debug!("runtime exposes no worker pool; proceeding");
        return;
    };
    debug!(workers = pool.len(), "waiting for background workers");

    let deadline = Instant::now() + options.worker_wait_ceiling;
    loop {
        if pool.iter().all(|worker| worker.loaded) {
            debug!("all background workers loaded");
            return;
        }
        if Instant::now() >= deadline {
            // Best-effort wait, not a hard gate.
            warn!(
                ceiling_ms = options.worker_wait_ceiling.as_millis() as u64,
                "worker pool still loading at the wait ceiling; proceeding"
            );
            return;
        }
        sleep(options.worker_poll_interval).await;
        pool = runtime.worker_pool().unwrap_or_default();
    }
}
