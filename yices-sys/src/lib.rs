//! Raw bindings to the Yices 2 SMT solver library.
//!
//! Declarations only; all semantics live in the linked `libyices`. The safe
//! wrapper types are in the `yices` crate.
//!
//! The native error convention: fallible calls return a negative code (or a
//! null handle for allocation-style calls) and leave details in a
//! thread-local error record reachable through [`yices_error_report`]. The
//! record persists until [`yices_clear_error`] is called.

#![allow(non_camel_case_types)]
#![allow(non_upper_case_globals)]

use std::os::raw::{c_char, c_int};

/// Term identifier. Negative values are invalid; [`NULL_TERM`] marks failure.
pub type term_t = i32;

/// Type identifier. Negative values are invalid; [`NULL_TYPE`] marks failure.
pub type type_t = i32;

/// Status code returned by the check functions; one of the `STATUS_*` values.
pub type smt_status_t = c_int;

pub const NULL_TERM: term_t = -1;
pub const NULL_TYPE: type_t = -1;

pub const STATUS_IDLE: smt_status_t = 0;
pub const STATUS_SEARCHING: smt_status_t = 1;
pub const STATUS_UNKNOWN: smt_status_t = 2;
pub const STATUS_SAT: smt_status_t = 3;
pub const STATUS_UNSAT: smt_status_t = 4;
pub const STATUS_INTERRUPTED: smt_status_t = 5;
pub const STATUS_ERROR: smt_status_t = 6;

/// Release of the headers these declarations were written against,
/// as (major, minor, patch).
pub const HEADER_VERSION: (u32, u32, u32) = (2, 6, 4);

#[repr(C)]
pub struct context_t {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct model_t {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct ctx_config_t {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct param_t {
    _unused: [u8; 0],
}

/// Thread-local error record of the native library.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct error_report_t {
    pub code: c_int,
    pub line: u32,
    pub column: u32,
    pub term1: term_t,
    pub type1: type_t,
    pub term2: term_t,
    pub type2: type_t,
    pub badval: i64,
}

/// Growable term array filled by query functions such as
/// [`yices_get_unsat_core`]. Must be initialized with
/// [`yices_init_term_vector`] and released with [`yices_delete_term_vector`].
#[repr(C)]
pub struct term_vector_t {
    pub capacity: u32,
    pub size: u32,
    pub data: *mut term_t,
}

/// Input/output record of [`yices_check_context_with_interpolation`]: the
/// caller fills the two context handles, the library fills `interpolant`
/// on unsat and `model` on sat (when requested).
#[repr(C)]
pub struct interpolation_context_t {
    pub ctx_a: *mut context_t,
    pub ctx_b: *mut context_t,
    pub interpolant: term_t,
    pub model: *mut model_t,
}

extern "C" {
    // Global initialization. `yices_init` must run before anything else.
    pub fn yices_init();
    pub fn yices_exit();
    pub fn yices_reset();

    // Version metadata.
    pub static yices_version: *const c_char;
    pub static yices_build_arch: *const c_char;
    pub static yices_build_mode: *const c_char;
    pub static yices_build_date: *const c_char;
    pub fn yices_has_mcsat() -> i32;

    // Error state.
    pub fn yices_error_code() -> c_int;
    pub fn yices_error_report() -> *mut error_report_t;
    pub fn yices_clear_error();
    /// Renders the pending error; the returned string must be released with
    /// [`yices_free_string`].
    pub fn yices_error_string() -> *mut c_char;
    pub fn yices_free_string(s: *mut c_char);

    // Context configurations.
    pub fn yices_new_config() -> *mut ctx_config_t;
    pub fn yices_free_config(config: *mut ctx_config_t);
    pub fn yices_set_config(
        config: *mut ctx_config_t,
        name: *const c_char,
        value: *const c_char,
    ) -> i32;
    pub fn yices_default_config_for_logic(config: *mut ctx_config_t, logic: *const c_char) -> i32;

    // Context lifecycle.
    pub fn yices_new_context(config: *const ctx_config_t) -> *mut context_t;
    pub fn yices_free_context(ctx: *mut context_t);
    pub fn yices_context_status(ctx: *mut context_t) -> smt_status_t;
    pub fn yices_reset_context(ctx: *mut context_t);

    // Assertion stack.
    pub fn yices_push(ctx: *mut context_t) -> i32;
    pub fn yices_pop(ctx: *mut context_t) -> i32;

    // Context options.
    pub fn yices_context_enable_option(ctx: *mut context_t, option: *const c_char) -> i32;
    pub fn yices_context_disable_option(ctx: *mut context_t, option: *const c_char) -> i32;

    // Assertions.
    pub fn yices_assert_formula(ctx: *mut context_t, t: term_t) -> i32;
    pub fn yices_assert_formulas(ctx: *mut context_t, n: u32, t: *const term_t) -> i32;
    pub fn yices_assert_blocking_clause(ctx: *mut context_t) -> i32;

    // Search.
    pub fn yices_check_context(ctx: *mut context_t, params: *const param_t) -> smt_status_t;
    pub fn yices_check_context_with_assumptions(
        ctx: *mut context_t,
        params: *const param_t,
        n: u32,
        t: *const term_t,
    ) -> smt_status_t;
    pub fn yices_check_context_with_model(
        ctx: *mut context_t,
        params: *const param_t,
        mdl: *mut model_t,
        n: u32,
        t: *const term_t,
    ) -> smt_status_t;
    pub fn yices_check_context_with_interpolation(
        ctx: *mut interpolation_context_t,
        params: *const param_t,
        build_model: i32,
    ) -> smt_status_t;
    /// Cooperative cancellation; may be called from another thread while a
    /// check on the same context is in flight. A no-op outside a search.
    pub fn yices_stop_search(ctx: *mut context_t);

    // Models.
    pub fn yices_get_model(ctx: *mut context_t, keep_subst: i32) -> *mut model_t;
    pub fn yices_free_model(mdl: *mut model_t);
    pub fn yices_get_bool_value(mdl: *mut model_t, t: term_t, val: *mut i32) -> i32;
    pub fn yices_get_int64_value(mdl: *mut model_t, t: term_t, val: *mut i64) -> i32;
    pub fn yices_formula_true_in_model(mdl: *mut model_t, f: term_t) -> i32;
    pub fn yices_model_to_string(
        mdl: *mut model_t,
        width: u32,
        height: u32,
        offset: u32,
    ) -> *mut c_char;

    // Cores and interpolants.
    pub fn yices_get_unsat_core(ctx: *mut context_t, v: *mut term_vector_t) -> i32;
    pub fn yices_get_model_interpolant(ctx: *mut context_t) -> term_t;
    pub fn yices_init_term_vector(v: *mut term_vector_t);
    pub fn yices_delete_term_vector(v: *mut term_vector_t);

    // Parameter records.
    pub fn yices_new_param_record() -> *mut param_t;
    pub fn yices_free_param_record(param: *mut param_t);
    pub fn yices_set_param(p: *mut param_t, pname: *const c_char, value: *const c_char) -> i32;
    pub fn yices_default_params_for_context(ctx: *mut context_t, params: *mut param_t);

    // Types and terms (minimal construction surface).
    pub fn yices_bool_type() -> type_t;
    pub fn yices_int_type() -> type_t;
    pub fn yices_real_type() -> type_t;
    pub fn yices_bv_type(size: u32) -> type_t;
    pub fn yices_new_uninterpreted_term(tau: type_t) -> term_t;
    pub fn yices_not(t: term_t) -> term_t;
    pub fn yices_or(n: u32, arg: *mut term_t) -> term_t;
    pub fn yices_and(n: u32, arg: *mut term_t) -> term_t;
    pub fn yices_set_term_name(t: term_t, name: *const c_char) -> i32;
    pub fn yices_remove_term_name(name: *const c_char);
    pub fn yices_parse_term(s: *const c_char) -> term_t;
    pub fn yices_term_to_string(t: term_t, width: u32, height: u32, offset: u32) -> *mut c_char;
}
