//! Context configuration records.
//!
//! A [`Config`] is built before a [`crate::Context`] and only read during
//! context creation. The logic-name constructors of `Context` create a
//! temporary one internally; drop semantics guarantee it is released on
//! every path, including early-error returns.

use std::ffi::CString;
use std::ptr;

use yices_sys as sys;

use crate::error::{check_code, last_error, Result, YicesError};

/// Owned configuration handle for context construction.
pub struct Config {
    ptr: *mut sys::ctx_config_t,
}

unsafe impl Send for Config {}

impl Config {
    /// Fresh configuration with the native defaults.
    pub fn new() -> Result<Self> {
        crate::ensure_init();
        let ptr = unsafe { sys::yices_new_config() };
        if ptr.is_null() {
            return Err(last_error());
        }
        Ok(Config { ptr })
    }

    /// Fresh configuration preloaded with the defaults for a named logic.
    pub fn with_defaults_for_logic(logic: &str) -> Result<Self> {
        let mut config = Config::new()?;
        config.default_for_logic(logic)?;
        Ok(config)
    }

    /// Set a named configuration option. The native layer validates both
    /// the name and the value.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let name = CString::new(name)?;
        let value = CString::new(value)?;
        check_code(unsafe { sys::yices_set_config(self.as_ptr()?, name.as_ptr(), value.as_ptr()) })
    }

    /// Load the default configuration for a named logic, e.g. `QF_LIA`.
    pub fn default_for_logic(&mut self, logic: &str) -> Result<()> {
        let logic = CString::new(logic)?;
        check_code(unsafe { sys::yices_default_config_for_logic(self.as_ptr()?, logic.as_ptr()) })
    }

    pub(crate) fn as_ptr(&self) -> Result<*mut sys::ctx_config_t> {
        if self.ptr.is_null() {
            Err(YicesError::Closed("configuration"))
        } else {
            Ok(self.ptr)
        }
    }

    /// Release the native record. Idempotent; also run on drop.
    pub fn close(&mut self) {
        if !self.ptr.is_null() {
            unsafe { sys::yices_free_config(self.ptr) };
            self.ptr = ptr::null_mut();
        }
    }
}

impl Drop for Config {
    fn drop(&mut self) {
        self.close();
    }
}
