//! Optional accounting of time spent inside the native solver.
//!
//! Off by default and never behavior-affecting: with the profiler
//! disabled, the instrumented call sites run unwrapped. When enabled, each
//! site accumulates its total wall time in a lock-free map alongside a
//! process-wide grand total.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use once_cell::sync::Lazy;

static ENABLED: AtomicBool = AtomicBool::new(false);
static TOTAL_NANOS: AtomicU64 = AtomicU64::new(0);
static LINE_ITEMS: Lazy<DashMap<&'static str, AtomicU64>> = Lazy::new(DashMap::new);

/// Process-wide profiler over native call sites.
pub struct Profiler;

impl Profiler {
    /// Turn sampling on or off.
    pub fn configure(enabled: bool) {
        ENABLED.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled() -> bool {
        ENABLED.load(Ordering::Relaxed)
    }

    /// Charge one sample to a call site.
    pub fn record(site: &'static str, elapsed: Duration) {
        let nanos = elapsed.as_nanos() as u64;
        TOTAL_NANOS.fetch_add(nanos, Ordering::Relaxed);
        LINE_ITEMS
            .entry(site)
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(nanos, Ordering::Relaxed);
    }

    /// Accumulated time spent in the native library.
    pub fn total() -> Duration {
        Duration::from_nanos(TOTAL_NANOS.load(Ordering::Relaxed))
    }

    /// Read the accumulated total and reset it to zero.
    pub fn take_total() -> Duration {
        Duration::from_nanos(TOTAL_NANOS.swap(0, Ordering::Relaxed))
    }

    /// Drop all recorded samples.
    pub fn reset() {
        TOTAL_NANOS.store(0, Ordering::Relaxed);
        LINE_ITEMS.clear();
    }

    /// Per-site summary, most expensive sites first.
    pub fn report() -> String {
        let mut items: Vec<(&'static str, u64)> = LINE_ITEMS
            .iter()
            .map(|entry| (*entry.key(), entry.value().load(Ordering::Relaxed)))
            .collect();
        items.sort_by(|a, b| b.1.cmp(&a.1));

        let width = items.iter().map(|(site, _)| site.len()).max().unwrap_or(0) + 5;
        let mut out = String::from("--- profiling summary ---\n");
        for (site, nanos) in items {
            let _ = writeln!(out, "{:<width$}{} ms", site, nanos / 1_000_000, width = width);
        }
        out
    }
}

/// Run `f`, charging its wall time to `site` when the profiler is on.
pub(crate) fn profile<T>(site: &'static str, f: impl FnOnce() -> T) -> T {
    if !Profiler::is_enabled() {
        return f();
    }
    let start = Instant::now();
    let result = f();
    Profiler::record(site, start.elapsed());
    result
}
