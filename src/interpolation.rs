//! Combined checks over a pair of contexts, yielding an interpolant or a
//! model.

use std::ptr;

use yices_sys as sys;

use crate::context::Context;
use crate::error::{last_error, Result};
use crate::model::Model;
use crate::params::{raw_or_null, Parameters};
use crate::profiler::profile;
use crate::status::Status;
use crate::terms::Term;
use crate::version::{self, INTERPOLATION};

/// Ties two contexts together for satisfiability with interpolation.
///
/// Both contexts stay owned by the caller; this wrapper borrows them
/// exclusively for its lifetime. Construction fails fast on a native
/// library older than 2.6.4.
pub struct InterpolationContext<'ctx> {
    ctx_a: &'ctx mut Context,
    ctx_b: &'ctx mut Context,
    interpolant: Option<Term>,
    model: Option<Model>,
}

impl<'ctx> InterpolationContext<'ctx> {
    pub fn new(ctx_a: &'ctx mut Context, ctx_b: &'ctx mut Context) -> Result<Self> {
        version::require_at_least(INTERPOLATION)?;
        Ok(InterpolationContext {
            ctx_a,
            ctx_b,
            interpolant: None,
            model: None,
        })
    }

    /// Check the combined assertions of both contexts.
    ///
    /// On [`Status::Unsat`], an interpolant over the common vocabulary is
    /// retained for [`Self::interpolant`]. On [`Status::Sat`] with
    /// `build_model`, a model of the combined assertions is retained for a
    /// single [`Self::take_model`] call. Every other outcome leaves both
    /// slots as they were; with `build_model` false the model slot is
    /// never filled, even on sat.
    pub fn check(&mut self, params: Option<&Parameters>, build_model: bool) -> Result<Status> {
        let params = raw_or_null(params)?;
        let mut raw = sys::interpolation_context_t {
            ctx_a: self.ctx_a.as_ptr()?,
            ctx_b: self.ctx_b.as_ptr()?,
            interpolant: sys::NULL_TERM,
            model: ptr::null_mut(),
        };
        let code = profile("yices_check_context_with_interpolation", || unsafe {
            sys::yices_check_context_with_interpolation(&mut raw, params, build_model as i32)
        });
        let status = match Status::from_raw(code) {
            Status::Error => return Err(last_error()),
            status => status,
        };
        match status {
            Status::Sat if build_model => {
                if raw.model.is_null() {
                    return Err(last_error());
                }
                self.model = Some(Model::from_raw(raw.model));
            }
            Status::Unsat => self.interpolant = Some(Term::from_raw(raw.interpolant)),
            _ => {}
        }
        Ok(status)
    }

    /// The interpolant retained by the latest unsat check, if any.
    /// Idempotent and side-effect free.
    pub fn interpolant(&self) -> Option<Term> {
        self.interpolant
    }

    /// Take the model retained by the latest sat check.
    ///
    /// A one-time take: ownership of the model (and the duty to release
    /// it) moves to the caller, and the internal slot is cleared, so a
    /// second call returns `None` rather than the same handle twice.
    pub fn take_model(&mut self) -> Option<Model> {
        self.model.take()
    }
}
