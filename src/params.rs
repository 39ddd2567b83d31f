//! Search parameter records consumed by the check calls.

use std::ffi::CString;
use std::fmt::{self, Display, Formatter};
use std::ptr;

use indexmap::IndexMap;
use yices_sys as sys;

use crate::context::Context;
use crate::error::{check_code, last_error, Result, YicesError};

/// Heuristic search parameters, preserving insertion order of keys.
///
/// A fresh record carries the native defaults for every parameter. Pairs
/// accepted by [`Parameters::set`] are additionally recorded here so the
/// effective overrides can be rendered; the native layer remains the
/// authority on names and values.
pub struct Parameters {
    ptr: *mut sys::param_t,
    values: IndexMap<String, String>,
}

unsafe impl Send for Parameters {}

impl Parameters {
    pub fn new() -> Result<Self> {
        crate::ensure_init();
        let ptr = unsafe { sys::yices_new_param_record() };
        if ptr.is_null() {
            return Err(last_error());
        }
        Ok(Parameters {
            ptr,
            values: IndexMap::new(),
        })
    }

    /// Set a search parameter; name and value are both given as strings.
    /// Fails if the native layer rejects the name or the value.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let cname = CString::new(name)?;
        let cvalue = CString::new(value)?;
        check_code(unsafe {
            sys::yices_set_param(self.as_ptr()?, cname.as_ptr(), cvalue.as_ptr())
        })?;
        self.values.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    /// Tune this record's defaults for the given context's configuration.
    /// One-way: the native call reports nothing back.
    pub fn defaults_for_context(&mut self, ctx: &Context) -> Result<()> {
        unsafe { sys::yices_default_params_for_context(ctx.as_ptr()?, self.as_ptr()?) };
        Ok(())
    }

    pub(crate) fn as_ptr(&self) -> Result<*mut sys::param_t> {
        if self.ptr.is_null() {
            Err(YicesError::Closed("parameter record"))
        } else {
            Ok(self.ptr)
        }
    }

    /// Release the native record. Idempotent; also run on drop.
    pub fn close(&mut self) {
        if !self.ptr.is_null() {
            unsafe { sys::yices_free_param_record(self.ptr) };
            self.ptr = ptr::null_mut();
        }
    }
}

impl Drop for Parameters {
    fn drop(&mut self) {
        self.close();
    }
}

/// Resolve an optional record to the raw pointer the check calls expect;
/// absent means "native defaults".
pub(crate) fn raw_or_null(params: Option<&Parameters>) -> Result<*const sys::param_t> {
    match params {
        Some(p) => Ok(p.as_ptr()? as *const sys::param_t),
        None => Ok(ptr::null()),
    }
}

/// Prints the explicitly set parameters as `name = value` lines.
impl Display for Parameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.values {
            writeln!(f, "{} = {}", name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::ptr;

    use indexmap::IndexMap;

    use super::Parameters;

    #[test]
    fn test_display_preserves_insertion_order() {
        let mut values = IndexMap::new();
        values.insert("branching".to_owned(), "negative".to_owned());
        values.insert("random-seed".to_owned(), "17".to_owned());
        // a record without a native handle is enough to render
        let params = Parameters {
            ptr: ptr::null_mut(),
            values,
        };
        assert_eq!(
            format!("{}", params),
            "branching = negative\nrandom-seed = 17\n"
        );
    }
}
