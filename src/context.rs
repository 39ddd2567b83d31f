//! The solver context: an assertion stack plus the machinery to check it.

use std::ffi::CString;
use std::ptr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::debug;
use yices_sys as sys;

use crate::config::Config;
use crate::error::{check_code, last_error, Result, YicesError};
use crate::model::Model;
use crate::params::{raw_or_null, Parameters};
use crate::profiler::profile;
use crate::status::Status;
use crate::terms::Term;
use crate::timeout::SearchTimer;
use crate::version::{self, INTERPOLATION};

/// Count of contexts holding an unreleased native handle. Diagnostic only;
/// no correctness decision depends on it.
static POPULATION: AtomicU64 = AtomicU64::new(0);

/// Operating mode of a context, restricting which operations its solver
/// supports. Not every mode is available for every logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    OneShot,
    MultiCheck,
    PushPop,
    Interactive,
}

impl Mode {
    fn as_str(self) -> &'static str {
        match self {
            Mode::OneShot => "one-shot",
            Mode::MultiCheck => "multi-check",
            Mode::PushPop => "push-pop",
            Mode::Interactive => "interactive",
        }
    }
}

/// A solver context wrapping one native context handle.
///
/// The wrapper is the handle's sole owner: every mutation goes through it,
/// and releasing it (explicitly via [`Context::close`] or by drop) frees
/// the native object exactly once. All operations on a closed context fail
/// fast with [`YicesError::Closed`]; `close` itself and
/// [`Context::stop_search`] are the only calls that tolerate any state.
///
/// Callers must serialize access to one context themselves. The single
/// sanctioned cross-thread interaction is the cancellation path:
/// `stop_search` may race with an in-flight check on the same handle.
pub struct Context {
    ptr: *mut sys::context_t,
}

// Exclusive ownership of the handle: moving a context between threads is
// fine, sharing one is not.
unsafe impl Send for Context {}

impl Context {
    /// New context with the default configuration: supports push/pop and
    /// the general mix of solvers (linear arithmetic, uninterpreted
    /// functions with arrays, bitvectors).
    pub fn new() -> Result<Self> {
        crate::ensure_init();
        let ptr = unsafe { sys::yices_new_context(ptr::null()) };
        Self::from_raw(ptr)
    }

    /// New context from a caller-built configuration.
    pub fn with_config(config: &Config) -> Result<Self> {
        crate::ensure_init();
        let ptr = unsafe { sys::yices_new_context(config.as_ptr()?) };
        Self::from_raw(ptr)
    }

    /// New context specialized for a named logic, supporting push/pop.
    pub fn for_logic(logic: &str) -> Result<Self> {
        // the temporary configuration is dropped on every path
        let config = Config::with_defaults_for_logic(logic)?;
        Self::with_config(&config)
    }

    /// New context specialized for a named logic and restricted to `mode`.
    pub fn for_logic_with_mode(logic: &str, mode: Mode) -> Result<Self> {
        let mut config = Config::with_defaults_for_logic(logic)?;
        config.set("mode", mode.as_str())?;
        Self::with_config(&config)
    }

    fn from_raw(ptr: *mut sys::context_t) -> Result<Self> {
        if ptr.is_null() {
            return Err(last_error());
        }
        POPULATION.fetch_add(1, Ordering::Relaxed);
        debug!(census = Self::census(), "created context");
        Ok(Context { ptr })
    }

    /// Number of contexts whose native handle has not been released yet.
    pub fn census() -> u64 {
        POPULATION.load(Ordering::Relaxed)
    }

    pub(crate) fn as_ptr(&self) -> Result<*mut sys::context_t> {
        if self.ptr.is_null() {
            Err(YicesError::Closed("context"))
        } else {
            Ok(self.ptr)
        }
    }

    /// Current native status. A pure query; does not drive the solver.
    pub fn status(&self) -> Result<Status> {
        Ok(Status::from_raw(unsafe {
            sys::yices_context_status(self.as_ptr()?)
        }))
    }

    /// Enable a named preprocessing or solving option.
    pub fn enable_option(&mut self, option: &str) -> Result<()> {
        let option = CString::new(option)?;
        check_code(unsafe { sys::yices_context_enable_option(self.as_ptr()?, option.as_ptr()) })
    }

    /// Disable a named preprocessing or solving option.
    pub fn disable_option(&mut self, option: &str) -> Result<()> {
        let option = CString::new(option)?;
        check_code(unsafe { sys::yices_context_disable_option(self.as_ptr()?, option.as_ptr()) })
    }

    /// Clear all assertions and the whole stack. Never fails on a live
    /// context.
    pub fn reset(&mut self) -> Result<()> {
        unsafe { sys::yices_reset_context(self.as_ptr()?) };
        Ok(())
    }

    /// Enter a new assertion-stack frame. Fails if the configured mode
    /// does not support the stack.
    pub fn push(&mut self) -> Result<()> {
        check_code(unsafe { sys::yices_push(self.as_ptr()?) })
    }

    /// Leave the current assertion-stack frame.
    pub fn pop(&mut self) -> Result<()> {
        check_code(unsafe { sys::yices_pop(self.as_ptr()?) })
    }

    /// Assert one Boolean term.
    pub fn assert_formula(&mut self, f: Term) -> Result<()> {
        let ptr = self.as_ptr()?;
        check_code(profile("yices_assert_formula", || unsafe {
            sys::yices_assert_formula(ptr, f.raw())
        }))
    }

    /// Assert a batch of Boolean terms.
    pub fn assert_formulas(&mut self, fs: &[Term]) -> Result<()> {
        let ptr = self.as_ptr()?;
        check_code(profile("yices_assert_formulas", || unsafe {
            sys::yices_assert_formulas(ptr, fs.len() as u32, fs.as_ptr().cast())
        }))
    }

    /// Block the model found by the latest successful check, forcing the
    /// next check to find a different one.
    pub fn assert_blocking_clause(&mut self) -> Result<()> {
        check_code(unsafe { sys::yices_assert_blocking_clause(self.as_ptr()?) })
    }

    /// Check the assertion set with default parameters.
    pub fn check(&mut self) -> Result<Status> {
        self.check_with_params(None)
    }

    /// Check the assertion set under the given parameter record.
    pub fn check_with_params(&mut self, params: Option<&Parameters>) -> Result<Status> {
        let ptr = self.as_ptr()?;
        let params = raw_or_null(params)?;
        let code = profile("yices_check_context", || unsafe {
            sys::yices_check_context(ptr, params)
        });
        finish_check(code)
    }

    /// Check, cancelling the search after roughly `timeout`.
    ///
    /// A timer task is armed for `max(timeout, 1s)`; when it fires it
    /// invokes the same cancellation primitive as [`Context::stop_search`]
    /// on this context, so the blocking native call returns with
    /// [`Status::Interrupted`] instead of running unbounded. The timer is
    /// disarmed on every return path before this method yields to the
    /// caller. Sub-second and zero timeouts are rounded up to one second;
    /// zero does not mean "no timeout".
    pub fn check_with_timeout(
        &mut self,
        params: Option<&Parameters>,
        timeout: Duration,
    ) -> Result<Status> {
        let ptr = self.as_ptr()?;
        let params = raw_or_null(params)?;
        let _timer = SearchTimer::arm(ptr, timeout);
        let code = profile("yices_check_context", || unsafe {
            sys::yices_check_context(ptr, params)
        });
        finish_check(code)
    }

    /// Check under a set of assumption literals. On an unsat outcome,
    /// [`Context::get_unsat_core`] names the responsible assumptions.
    /// Requires Yices 2.6.4.
    pub fn check_with_assumptions(
        &mut self,
        params: Option<&Parameters>,
        assumptions: &[Term],
    ) -> Result<Status> {
        let ptr = self.as_ptr()?;
        let params = raw_or_null(params)?;
        let code = profile("yices_check_context_with_assumptions", || unsafe {
            sys::yices_check_context_with_assumptions(
                ptr,
                params,
                assumptions.len() as u32,
                assumptions.as_ptr().cast(),
            )
        });
        finish_gated_check(code)
    }

    /// Check with the given model's assignments fixed for the listed
    /// terms. Requires Yices 2.6.4 and an MCSat-based context.
    pub fn check_with_model(
        &mut self,
        params: Option<&Parameters>,
        model: &Model,
        terms: &[Term],
    ) -> Result<Status> {
        let ptr = self.as_ptr()?;
        let params = raw_or_null(params)?;
        let model = model.as_ptr()?;
        let code = profile("yices_check_context_with_model", || unsafe {
            sys::yices_check_context_with_model(
                ptr,
                params,
                model,
                terms.len() as u32,
                terms.as_ptr().cast(),
            )
        });
        finish_gated_check(code)
    }

    /// Model of the satisfiable assertion set found by the latest check.
    /// Returns a new owned wrapper around a freshly allocated native model.
    pub fn get_model(&mut self) -> Result<Model> {
        let ptr = self.as_ptr()?;
        let model = profile("yices_get_model", || unsafe { sys::yices_get_model(ptr, 1) });
        if model.is_null() {
            return Err(last_error());
        }
        Ok(Model::from_raw(model))
    }

    /// Subset of the assumptions of the latest unsat
    /// [`Context::check_with_assumptions`] call sufficient for
    /// unsatisfiability, in the native order. Requires Yices 2.6.4.
    pub fn get_unsat_core(&mut self) -> Result<Vec<Term>> {
        let ptr = self.as_ptr()?;
        let mut vector = TermVector::new();
        let code = unsafe { sys::yices_get_unsat_core(ptr, vector.as_mut_ptr()) };
        if code < 0 {
            return Err(version::gated_error(INTERPOLATION));
        }
        Ok(vector.to_vec())
    }

    /// Interpolant derived from the latest check-with-model call.
    /// Requires Yices 2.6.4.
    pub fn get_model_interpolant(&mut self) -> Result<Term> {
        let ptr = self.as_ptr()?;
        let term = unsafe { sys::yices_get_model_interpolant(ptr) };
        if term < 0 {
            return Err(version::gated_error(INTERPOLATION));
        }
        Ok(Term::from_raw(term))
    }

    /// Ask an in-flight check to stop. Advisory and never failing: a
    /// search that already finished ignores it, and a released context is
    /// a no-op. Safe to call while another thread blocks in a check on
    /// this context, which is exactly what the timeout timer does.
    pub fn stop_search(&self) {
        if !self.ptr.is_null() {
            unsafe { sys::yices_stop_search(self.ptr) };
        }
    }

    /// Release the native context. Idempotent; also run on drop.
    pub fn close(&mut self) {
        if !self.ptr.is_null() {
            profile("yices_free_context", || unsafe {
                sys::yices_free_context(self.ptr)
            });
            self.ptr = ptr::null_mut();
            POPULATION.fetch_sub(1, Ordering::Relaxed);
            debug!(census = Self::census(), "closed context");
        }
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.close();
    }
}

/// Map the status code of a finished check; `STATUS_ERROR` becomes the
/// pending native error.
fn finish_check(code: sys::smt_status_t) -> Result<Status> {
    match Status::from_raw(code) {
        Status::Error => Err(last_error()),
        status => {
            debug!(%status, "check finished");
            Ok(status)
        }
    }
}

/// Like [`finish_check`] for the operations added in 2.6.4: a failure on
/// an older library is reported as a version mismatch instead of the
/// generic native error.
fn finish_gated_check(code: sys::smt_status_t) -> Result<Status> {
    match Status::from_raw(code) {
        Status::Error => Err(version::gated_error(INTERPOLATION)),
        status => {
            debug!(%status, "check finished");
            Ok(status)
        }
    }
}

/// Owned native term vector, released even when the filling call fails.
struct TermVector(sys::term_vector_t);

impl TermVector {
    fn new() -> Self {
        let mut raw = sys::term_vector_t {
            capacity: 0,
            size: 0,
            data: ptr::null_mut(),
        };
        unsafe { sys::yices_init_term_vector(&mut raw) };
        TermVector(raw)
    }

    fn as_mut_ptr(&mut self) -> *mut sys::term_vector_t {
        &mut self.0
    }

    fn to_vec(&self) -> Vec<Term> {
        if self.0.data.is_null() {
            return Vec::new();
        }
        unsafe { std::slice::from_raw_parts(self.0.data, self.0.size as usize) }
            .iter()
            .map(|&t| Term::from_raw(t))
            .collect()
    }
}

impl Drop for TermVector {
    fn drop(&mut self) {
        unsafe { sys::yices_delete_term_vector(&mut self.0) };
    }
}
