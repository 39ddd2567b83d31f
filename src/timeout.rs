//! Timer-based cancellation of blocking check calls.
//!
//! A timed check arms one [`SearchTimer`] on a small dedicated runtime and
//! holds the guard across the blocking native call. The timer task's only
//! permitted side effect is `yices_stop_search` on the same context
//! handle, which the native library allows concurrently with an in-flight
//! check. Dropping the guard disarms the task, so no two timed checks on
//! the same context ever have overlapping timers.

use std::time::Duration;

use once_cell::sync::Lazy;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;
use tracing::trace;
use yices_sys as sys;

/// Floor for armed timers. Sub-second and zero timeouts are rounded up to
/// one second; they never disable cancellation.
pub(crate) const MIN_TIMEOUT: Duration = Duration::from_secs(1);

static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("yices-timer")
        .enable_time()
        .build()
        .expect("failed to start the yices timer runtime")
});

/// Context pointer handed to the timer task. The task uses it for
/// `yices_stop_search` and nothing else; the owning wrapper stays mutably
/// borrowed by the check call for the entire time the task is armed.
struct StopHandle(*mut sys::context_t);

unsafe impl Send for StopHandle {}

/// Armed cancellation timer for one timed check call.
///
/// A timer that fires just as the search finishes is harmless: stopping a
/// finished search is a no-op in the native library.
pub(crate) struct SearchTimer {
    task: JoinHandle<()>,
}

impl SearchTimer {
    pub(crate) fn arm(ctx: *mut sys::context_t, after: Duration) -> SearchTimer {
        let delay = after.max(MIN_TIMEOUT);
        let stop = StopHandle(ctx);
        let task = RUNTIME.spawn(async move {
            // Capture the whole `Send` wrapper, not just its raw-pointer field
            // (edition 2021 disjoint closure capture would otherwise move the
            // non-`Send` `*mut context_t` into the future).
            let stop = stop;
            tokio::time::sleep(delay).await;
            trace!(?delay, "check timeout expired, stopping search");
            unsafe { sys::yices_stop_search(stop.0) };
        });
        SearchTimer { task }
    }
}

impl Drop for SearchTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
