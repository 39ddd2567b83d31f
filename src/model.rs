//! Models produced by satisfiable checks.

use std::fmt::{self, Display, Formatter};
use std::ptr;

use yices_sys as sys;

use crate::error::{last_error, Result, YicesError};
use crate::terms::Term;

/// A satisfying assignment owned by the caller.
///
/// Produced by [`crate::Context::get_model`] and
/// [`crate::InterpolationContext::take_model`]; owns its native handle
/// until closed or dropped. The value queries cover what the binding
/// itself needs; the native query surface is much larger.
pub struct Model {
    ptr: *mut sys::model_t,
}

unsafe impl Send for Model {}

impl Model {
    pub(crate) fn from_raw(ptr: *mut sys::model_t) -> Model {
        Model { ptr }
    }

    pub(crate) fn as_ptr(&self) -> Result<*mut sys::model_t> {
        if self.ptr.is_null() {
            Err(YicesError::Closed("model"))
        } else {
            Ok(self.ptr)
        }
    }

    /// Value of a Boolean term in this model.
    pub fn bool_value(&self, t: Term) -> Result<bool> {
        let mut value: i32 = 0;
        let code = unsafe { sys::yices_get_bool_value(self.as_ptr()?, t.raw(), &mut value) };
        if code < 0 {
            return Err(last_error());
        }
        Ok(value != 0)
    }

    /// Value of an integer term, provided it fits in 64 bits.
    pub fn int_value(&self, t: Term) -> Result<i64> {
        let mut value: i64 = 0;
        let code = unsafe { sys::yices_get_int64_value(self.as_ptr()?, t.raw(), &mut value) };
        if code < 0 {
            return Err(last_error());
        }
        Ok(value)
    }

    /// Whether the formula evaluates to true under this model.
    pub fn formula_is_true(&self, f: Term) -> Result<bool> {
        let code = unsafe { sys::yices_formula_true_in_model(self.as_ptr()?, f.raw()) };
        if code < 0 {
            return Err(last_error());
        }
        Ok(code == 1)
    }

    /// Release the native model. Idempotent; also run on drop.
    pub fn close(&mut self) {
        if !self.ptr.is_null() {
            unsafe { sys::yices_free_model(self.ptr) };
            self.ptr = ptr::null_mut();
        }
    }
}

impl Drop for Model {
    fn drop(&mut self) {
        self.close();
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // a closed model renders as the empty assignment
        if self.ptr.is_null() {
            return Ok(());
        }
        let raw = unsafe { sys::yices_model_to_string(self.ptr, 120, u32::MAX, 0) };
        if raw.is_null() {
            return Err(fmt::Error);
        }
        let result = {
            let rendered = unsafe { std::ffi::CStr::from_ptr(raw) }.to_string_lossy();
            f.write_str(&rendered)
        };
        unsafe { sys::yices_free_string(raw) };
        result
    }
}
