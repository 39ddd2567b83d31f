//! The outcome space of a satisfiability check.

use std::fmt::{self, Display, Formatter};

use yices_sys as sys;

/// Result of a check call, mirroring the native status codes.
///
/// [`Status::Error`] never reaches callers of the checked operations; the
/// call sites translate it into a [`crate::YicesError`] carrying the
/// pending native error. It only shows up verbatim through the pure
/// [`crate::Context::status`] query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Idle,
    Searching,
    Unknown,
    Sat,
    Unsat,
    Interrupted,
    Error,
}

impl Status {
    /// Map a raw status code. Unrecognized codes collapse to
    /// [`Status::Error`].
    pub(crate) fn from_raw(code: sys::smt_status_t) -> Status {
        match code {
            sys::STATUS_IDLE => Status::Idle,
            sys::STATUS_SEARCHING => Status::Searching,
            sys::STATUS_UNKNOWN => Status::Unknown,
            sys::STATUS_SAT => Status::Sat,
            sys::STATUS_UNSAT => Status::Unsat,
            sys::STATUS_INTERRUPTED => Status::Interrupted,
            _ => Status::Error,
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Idle => "idle",
            Status::Searching => "searching",
            Status::Unknown => "unknown",
            Status::Sat => "sat",
            Status::Unsat => "unsat",
            Status::Interrupted => "interrupted",
            Status::Error => "error",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod test {
    use super::Status;

    #[test]
    fn test_from_raw() {
        assert_eq!(Status::from_raw(0), Status::Idle);
        assert_eq!(Status::from_raw(3), Status::Sat);
        assert_eq!(Status::from_raw(4), Status::Unsat);
        assert_eq!(Status::from_raw(5), Status::Interrupted);
        assert_eq!(Status::from_raw(6), Status::Error);
        // out-of-range codes are not a distinct state
        assert_eq!(Status::from_raw(-1), Status::Error);
        assert_eq!(Status::from_raw(42), Status::Error);
    }
}
