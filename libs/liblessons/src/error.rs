//! Unified error type for liblessons operations.
//!
//! All fallible wrappers in liblessons return `Result<T, Error>`. The value
//! stands in for errno: it is captured once, at the failing call, and then
//! passed around explicitly.

use crate::errno::{classify, Category, Errno};
use crate::syscall;

/// Unified error type for liblessons operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A named errno from a failed call.
    Os(Errno),
    /// An errno value with no entry in [`Errno`].
    Unrecognized(i32),
    /// A path argument contained an interior NUL byte.
    NulInPath,
    /// A version string that could not be parsed.
    Version(String),
}

impl Error {
    /// Build an error from a raw errno value.
    pub fn from_raw(code: i32) -> Error {
        match Errno::from_raw(code) {
            Some(e) => Error::Os(e),
            None => Error::Unrecognized(code),
        }
    }

    /// Capture the calling thread's current errno.
    #[inline]
    pub fn last_os_error() -> Error {
        Error::from_raw(syscall::errno())
    }

    /// The numeric code, if this error came from errno.
    pub fn code(&self) -> Option<i32> {
        match self {
            Error::Os(e) => Some(e.raw()),
            Error::Unrecognized(code) => Some(*code),
            Error::NulInPath | Error::Version(_) => None,
        }
    }

    /// Reporting bucket. Errors that did not come from errno count as
    /// invalid arguments.
    pub fn category(&self) -> Category {
        match self {
            Error::Os(e) => e.category(),
            Error::Unrecognized(code) => classify(*code),
            Error::NulInPath | Error::Version(_) => Category::InvalidArgument,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Os(e) => write!(f, "{} (errno={})", e, e.raw()),
            Error::Unrecognized(code) => write!(f, "unrecognized errno {}", code),
            Error::NulInPath => f.write_str("path contains a NUL byte"),
            Error::Version(s) => write!(f, "unparseable libc version {:?}", s),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_names_known_codes() {
        assert_eq!(Error::from_raw(libc::ENOENT), Error::Os(Errno::ENOENT));
        assert_eq!(Error::from_raw(99999), Error::Unrecognized(99999));
    }

    #[test]
    fn test_code_reports_numeric_value() {
        assert_eq!(Error::Os(Errno::EBADF).code(), Some(libc::EBADF));
        assert_eq!(Error::Unrecognized(4242).code(), Some(4242));
        assert_eq!(Error::NulInPath.code(), None);
    }

    #[test]
    fn test_category_follows_errno() {
        assert_eq!(Error::Os(Errno::EACCES).category(), Category::Permission);
        assert_eq!(Error::Unrecognized(4242).category(), Category::Other);
        assert_eq!(Error::NulInPath.category(), Category::InvalidArgument);
    }

    #[test]
    fn test_display_includes_code() {
        let msg = Error::Os(Errno::ENOENT).to_string();
        assert!(msg.contains("ENOENT"), "{}", msg);
        assert!(msg.contains(&format!("errno={}", libc::ENOENT)), "{}", msg);
        assert!(Error::Unrecognized(4242).to_string().contains("4242"));
    }
}
