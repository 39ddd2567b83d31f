//! Error capture and translation for checked native calls.
//!
//! Every fallible native call is wrapped in the same convention: invoke,
//! inspect the sentinel, and on failure snapshot the native error record
//! into an [`ErrorReport`], render the native message, clear the native
//! error state, and return a [`YicesError`]. The snapshot happens strictly
//! before the reset; otherwise stale error data would leak into the next
//! unrelated failure.

use std::ffi::{CStr, NulError};

use thiserror::Error;
use yices_sys as sys;

use crate::version::Version;

pub type Result<T> = std::result::Result<T, YicesError>;

/// Snapshot of the native error record at the moment a failure was detected.
///
/// Immutable once constructed. Attached to every [`YicesError::Solver`];
/// all fields are zero when the native library had nothing to report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorReport {
    pub code: i32,
    pub line: u32,
    pub column: u32,
    pub term1: i32,
    pub type1: i32,
    pub term2: i32,
    pub type2: i32,
    pub badval: i64,
}

/// Everything that can go wrong in the binding layer.
///
/// The variants are the error taxonomy: native-reported failures, version
/// mismatches on gated operations, and programming misuse of released
/// wrappers. Callers can match on the variant instead of parsing messages.
#[derive(Debug, Error)]
pub enum YicesError {
    /// The native library reported a failure.
    #[error("{message}")]
    Solver {
        message: String,
        report: ErrorReport,
    },
    /// A version-gated operation was invoked against a library older than
    /// it requires.
    #[error(
        "the operation requires Yices {required}, but the loaded library \
         is {loaded} (headers: {compiled})"
    )]
    VersionMismatch {
        required: Version,
        loaded: Version,
        compiled: Version,
    },
    /// An operation was invoked on a wrapper whose native handle was
    /// already released.
    #[error("operation on a closed {0}")]
    Closed(&'static str),
    /// A string destined for the native library contains a NUL byte.
    #[error("string passed to the solver contains a NUL byte")]
    Nul(#[from] NulError),
}

/// Capture the pending native error and translate it.
///
/// Reads the thread-local record and the rendered message first, then
/// clears the native error state. Must be called immediately adjacent to
/// the failing call, before any other native call can overwrite the record.
pub(crate) fn last_error() -> YicesError {
    let report = unsafe {
        let raw = sys::yices_error_report();
        ErrorReport {
            code: (*raw).code,
            line: (*raw).line,
            column: (*raw).column,
            term1: (*raw).term1,
            type1: (*raw).type1,
            term2: (*raw).term2,
            type2: (*raw).type2,
            badval: (*raw).badval,
        }
    };
    let message = unsafe {
        let raw = sys::yices_error_string();
        if raw.is_null() {
            String::from("unknown Yices error")
        } else {
            let message = CStr::from_ptr(raw).to_string_lossy().into_owned();
            sys::yices_free_string(raw);
            message
        }
    };
    unsafe { sys::yices_clear_error() };
    YicesError::Solver { message, report }
}

/// Translate the usual negative-code sentinel.
pub(crate) fn check_code(code: i32) -> Result<()> {
    if code < 0 {
        Err(last_error())
    } else {
        Ok(())
    }
}
