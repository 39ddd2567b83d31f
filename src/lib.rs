//! Safe bindings to the Yices 2 SMT solver.
//!
//! The native library hands out opaque handles for contexts, parameter
//! records, models, and configurations. This crate pairs every handle with
//! exactly one owning wrapper ([`Context`], [`Parameters`], [`Model`],
//! [`Config`]) whose drop releases it; explicit [`Context::close`] (and
//! friends) is available for early, idempotent release. Failed native calls
//! are translated into [`YicesError`] values carrying a snapshot of the
//! native error record ([`ErrorReport`]), taken and cleared at the point of
//! failure.
//!
//! Terms and types are *not* modeled here; they remain opaque identifiers
//! ([`Term`], [`Type`]) in the native term table, with a minimal
//! construction surface in [`terms`].
//!
//! Long-running [`Context::check_with_timeout`] calls are cancelled
//! cooperatively by a timer task whose only side effect is
//! [`Context::stop_search`]; see [`context`] for the details.

pub mod config;
pub mod context;
pub mod error;
pub mod interpolation;
pub mod model;
pub mod params;
pub mod profiler;
pub mod status;
pub mod terms;
pub mod version;

mod timeout;

pub use config::Config;
pub use context::{Context, Mode};
pub use error::{ErrorReport, Result, YicesError};
pub use interpolation::InterpolationContext;
pub use model::Model;
pub use params::Parameters;
pub use profiler::Profiler;
pub use status::Status;
pub use terms::{Term, Type};
pub use version::Version;

use std::sync::Once;

/// Run the native library's global initialization exactly once.
///
/// Every constructor-like entry point calls this. There is no matching
/// `yices_exit`: the native handle tables live for the process lifetime.
pub(crate) fn ensure_init() {
    static INIT: Once = Once::new();
    INIT.call_once(|| unsafe { yices_sys::yices_init() });
}
