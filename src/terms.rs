//! Minimal surface over the external term and type space.
//!
//! Terms and types live entirely inside the native library; this module
//! only hands out their opaque identifiers. The constructors here are the
//! sliver needed to build assertions and inspect results; the full native
//! construction API is far larger and deliberately not wrapped.

use std::ffi::{CStr, CString};

use yices_sys as sys;

use crate::error::{check_code, last_error, Result};

/// Opaque identifier of a native term.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term(sys::term_t);

impl Term {
    pub(crate) fn from_raw(raw: sys::term_t) -> Term {
        Term(raw)
    }

    pub(crate) fn raw(self) -> sys::term_t {
        self.0
    }
}

/// Opaque identifier of a native type.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Type(sys::type_t);

impl Type {
    pub(crate) fn raw(self) -> sys::type_t {
        self.0
    }
}

fn checked_term(raw: sys::term_t) -> Result<Term> {
    if raw < 0 {
        Err(last_error())
    } else {
        Ok(Term(raw))
    }
}

fn checked_type(raw: sys::type_t) -> Result<Type> {
    if raw < 0 {
        Err(last_error())
    } else {
        Ok(Type(raw))
    }
}

pub fn bool_type() -> Result<Type> {
    crate::ensure_init();
    checked_type(unsafe { sys::yices_bool_type() })
}

pub fn int_type() -> Result<Type> {
    crate::ensure_init();
    checked_type(unsafe { sys::yices_int_type() })
}

pub fn real_type() -> Result<Type> {
    crate::ensure_init();
    checked_type(unsafe { sys::yices_real_type() })
}

/// Bitvector type of the given width.
pub fn bv_type(size: u32) -> Result<Type> {
    crate::ensure_init();
    checked_type(unsafe { sys::yices_bv_type(size) })
}

/// Fresh uninterpreted term (a free variable) of the given type.
pub fn new_uninterpreted_term(tau: Type) -> Result<Term> {
    crate::ensure_init();
    checked_term(unsafe { sys::yices_new_uninterpreted_term(tau.raw()) })
}

/// Fresh uninterpreted term bound to a global name, visible to [`parse`].
pub fn named_variable(name: &str, tau: Type) -> Result<Term> {
    let t = new_uninterpreted_term(tau)?;
    set_term_name(t, name)?;
    Ok(t)
}

/// Bind a global name to a term.
pub fn set_term_name(t: Term, name: &str) -> Result<()> {
    let name = CString::new(name)?;
    check_code(unsafe { sys::yices_set_term_name(t.raw(), name.as_ptr()) })
}

/// Remove a global term name. Unknown names are ignored by the native layer.
pub fn remove_term_name(name: &str) -> Result<()> {
    let name = CString::new(name)?;
    unsafe { sys::yices_remove_term_name(name.as_ptr()) };
    Ok(())
}

/// Parse a term written in the Yices input language.
pub fn parse(s: &str) -> Result<Term> {
    crate::ensure_init();
    let s = CString::new(s)?;
    checked_term(unsafe { sys::yices_parse_term(s.as_ptr()) })
}

/// Boolean negation.
pub fn not(t: Term) -> Result<Term> {
    checked_term(unsafe { sys::yices_not(t.raw()) })
}

/// Disjunction of the given terms. Empty input yields `false`.
pub fn or(terms: &[Term]) -> Result<Term> {
    // the native call may scramble its argument array, so pass a copy
    let mut args: Vec<sys::term_t> = terms.iter().map(|t| t.raw()).collect();
    checked_term(unsafe { sys::yices_or(args.len() as u32, args.as_mut_ptr()) })
}

/// Conjunction of the given terms. Empty input yields `true`.
pub fn and(terms: &[Term]) -> Result<Term> {
    let mut args: Vec<sys::term_t> = terms.iter().map(|t| t.raw()).collect();
    checked_term(unsafe { sys::yices_and(args.len() as u32, args.as_mut_ptr()) })
}

/// Render a term with the native pretty-printer.
pub fn to_string(t: Term) -> Result<String> {
    let raw = unsafe { sys::yices_term_to_string(t.raw(), 120, 1, 0) };
    if raw.is_null() {
        return Err(last_error());
    }
    let rendered = unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned();
    unsafe { sys::yices_free_string(raw) };
    Ok(rendered)
}
