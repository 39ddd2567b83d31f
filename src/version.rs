//! Version metadata of the linked library and the gate for operations that
//! newer releases added.
//!
//! Several operations (assumption checks, unsat cores, interpolation) exist
//! only since Yices 2.6.4. When such a call fails, the failure is
//! reclassified: if the loaded library predates the requirement, the caller
//! gets a [`YicesError::VersionMismatch`] naming the required, loaded, and
//! compiled-against versions; otherwise the generic native error. The
//! reclassification runs only *after* the primitive has failed, so a
//! sufficiently new library never has a real error masked.

use std::cmp::Ordering;
use std::ffi::CStr;
use std::fmt::{self, Display, Formatter};
use std::os::raw::c_char;
use std::str::FromStr;

use once_cell::sync::Lazy;
use yices_sys as sys;

use crate::error::{last_error, Result, YicesError};

/// A Yices release number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Single-number encoding used for release comparisons.
    pub const fn ordinal(self) -> u32 {
        self.major * 10_000 + self.minor * 100 + self.patch
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        fn component(part: Option<&str>) -> std::result::Result<u32, ()> {
            let digits: String = part
                .ok_or(())?
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().map_err(|_| ())
        }

        let mut parts = s.trim().splitn(3, '.');
        let major = component(parts.next())?;
        let minor = component(parts.next())?;
        let patch = component(parts.next())?;
        Ok(Version::new(major, minor, patch))
    }
}

/// Release of the headers `yices-sys` was written against.
pub const COMPILED: Version = Version::new(
    sys::HEADER_VERSION.0,
    sys::HEADER_VERSION.1,
    sys::HEADER_VERSION.2,
);

/// First release with assumption checks, unsat cores, and interpolation.
pub(crate) const INTERPOLATION: Version = Version::new(2, 6, 4);

static LOADED: Lazy<Version> = Lazy::new(|| {
    crate::ensure_init();
    // An unparseable version string degrades to 0.0.0, which makes every
    // gated operation report a mismatch instead of a misleading native error.
    version_string().parse().unwrap_or(Version::new(0, 0, 0))
});

/// Version of the library actually linked at run time. Parsed once.
pub fn loaded() -> Version {
    *LOADED
}

/// The native library's own version string, verbatim.
pub fn version_string() -> String {
    crate::ensure_init();
    global_string(unsafe { sys::yices_version })
}

/// Target architecture the native library was built for.
pub fn build_arch() -> String {
    crate::ensure_init();
    global_string(unsafe { sys::yices_build_arch })
}

/// Build mode of the native library (e.g. `release`).
pub fn build_mode() -> String {
    crate::ensure_init();
    global_string(unsafe { sys::yices_build_mode })
}

/// Build date of the native library.
pub fn build_date() -> String {
    crate::ensure_init();
    global_string(unsafe { sys::yices_build_date })
}

/// Whether the native library was compiled with MCSat support.
pub fn has_mcsat() -> bool {
    crate::ensure_init();
    unsafe { sys::yices_has_mcsat() != 0 }
}

fn global_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Fail with a [`YicesError::VersionMismatch`] if the loaded library
/// predates `required`.
pub fn require_at_least(required: Version) -> Result<()> {
    let loaded = loaded();
    if required.ordinal() > loaded.ordinal() {
        Err(YicesError::VersionMismatch {
            required,
            loaded,
            compiled: COMPILED,
        })
    } else {
        Ok(())
    }
}

/// Reclassify the failure of a version-gated primitive.
///
/// Only valid after the primitive has already failed. A too-old library
/// yields the mismatch error; the stale native error record is cleared in
/// that path as well so it cannot surface later.
pub(crate) fn gated_error(required: Version) -> YicesError {
    match require_at_least(required) {
        Err(mismatch) => {
            unsafe { sys::yices_clear_error() };
            mismatch
        }
        Ok(()) => last_error(),
    }
}
