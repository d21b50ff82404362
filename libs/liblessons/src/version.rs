//! C library version detection
//!
//! Three independent sources:
//! - [`compile_time`]: what the target's headers declared when this crate
//!   was built (`__GLIBC__` / `__GLIBC_MINOR__`, captured by build.rs)
//! - [`runtime`]: `gnu_get_libc_version()` from the loaded libc
//! - [`confstr_version`]: `confstr(_CS_GNU_LIBC_VERSION)`
//!
//! They can disagree: a binary built against older headers reports the old
//! compile-time version while the runtime checks see the installed libc.

use core::fmt;
use core::str::FromStr;
use std::ffi::CStr;

use crate::error::Error;

/// `_CS_GNU_LIBC_VERSION` from glibc's `<bits/confname.h>`.
pub const CS_GNU_LIBC_VERSION: libc::c_int = 2;

extern "C" {
    fn confstr(name: libc::c_int, buf: *mut libc::c_char, len: libc::size_t) -> libc::size_t;
}

#[cfg(target_env = "gnu")]
extern "C" {
    fn gnu_get_libc_version() -> *const libc::c_char;
}

/// A parsed `major.minor[.patch]` libc version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LibcVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl LibcVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor, patch: None }
    }

    /// True when major and minor agree; patch levels are ignored.
    pub fn same_release(&self, other: &LibcVersion) -> bool {
        self.major == other.major && self.minor == other.minor
    }
}

impl FromStr for LibcVersion {
    type Err = Error;

    /// Accepts `"2.39"`, `"2.35.1"` and the confstr form `"glibc 2.39"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || Error::Version(s.to_string());
        let numbers = s.trim().rsplit(' ').next().ok_or_else(bad)?;
        let mut parts = numbers.split('.');

        let mut next = |required: bool| -> Result<Option<u32>, Error> {
            match parts.next() {
                Some(p) => p.parse().map(Some).map_err(|_| bad()),
                None if required => Err(bad()),
                None => Ok(None),
            }
        };
        let major = next(true)?.ok_or_else(bad)?;
        let minor = next(true)?.ok_or_else(bad)?;
        let patch = next(false)?;
        if parts.next().is_some() {
            return Err(bad());
        }
        Ok(Self { major, minor, patch })
    }
}

impl fmt::Display for LibcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(patch) = self.patch {
            write!(f, ".{}", patch)?;
        }
        Ok(())
    }
}

/// Version declared by the target's glibc headers at build time, or `None`
/// if the crate was not compiled against glibc.
#[cfg(glibc_headers)]
pub fn compile_time() -> Option<LibcVersion> {
    let major = env!("LESSONS_GLIBC_MAJOR").parse().ok()?;
    let minor = env!("LESSONS_GLIBC_MINOR").parse().ok()?;
    Some(LibcVersion::new(major, minor))
}

/// Version declared by the target's glibc headers at build time, or `None`
/// if the crate was not compiled against glibc.
#[cfg(not(glibc_headers))]
pub fn compile_time() -> Option<LibcVersion> {
    None
}

/// Whether the build-time probe found glibc headers.
pub const fn compiled_with_glibc() -> bool {
    cfg!(glibc_headers)
}

/// Version string reported by the running glibc, or `None` when this
/// binary is not linked against glibc.
pub fn runtime() -> Option<String> {
    #[cfg(target_env = "gnu")]
    {
        // SAFETY: gnu_get_libc_version returns a pointer to a static
        // NUL-terminated string.
        let s = unsafe { CStr::from_ptr(gnu_get_libc_version()) };
        Some(s.to_string_lossy().into_owned())
    }
    #[cfg(not(target_env = "gnu"))]
    {
        None
    }
}

/// Value of `confstr(_CS_GNU_LIBC_VERSION)`, e.g. `"glibc 2.39"`.
///
/// `None` when the system has no value for the key (not glibc) or the
/// value is empty.
pub fn confstr_version() -> Option<String> {
    confstr_string(CS_GNU_LIBC_VERSION)
}

/// Query a confstr key into a buffer sized by a first, length-only call.
pub fn confstr_string(name: libc::c_int) -> Option<String> {
    // SAFETY: a NULL buffer with length 0 only asks for the required size.
    let size = unsafe { confstr(name, core::ptr::null_mut(), 0) };
    if size == 0 {
        tracing::debug!(name, "confstr has no value for key");
        return None;
    }

    let mut buf = vec![0u8; size];
    // SAFETY: buf is valid for `size` bytes.
    let written = unsafe { confstr(name, buf.as_mut_ptr().cast(), size) };
    if written == 0 {
        return None;
    }

    let value = CStr::from_bytes_until_nul(&buf).ok()?.to_string_lossy().into_owned();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_version() {
        let v: LibcVersion = "2.39".parse().unwrap();
        assert_eq!(v, LibcVersion::new(2, 39));
        assert_eq!(v.to_string(), "2.39");
    }

    #[test]
    fn test_parse_confstr_form() {
        let v: LibcVersion = "glibc 2.35".parse().unwrap();
        assert_eq!(v, LibcVersion::new(2, 35));
    }

    #[test]
    fn test_parse_patch_level() {
        let v: LibcVersion = "2.35.1".parse().unwrap();
        assert_eq!(v.patch, Some(1));
        assert_eq!(v.to_string(), "2.35.1");
        assert!(v.same_release(&LibcVersion::new(2, 35)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<LibcVersion>().is_err());
        assert!("2".parse::<LibcVersion>().is_err());
        assert!("two.three".parse::<LibcVersion>().is_err());
        assert!("2.3.4.5".parse::<LibcVersion>().is_err());
        assert!("2.-1".parse::<LibcVersion>().is_err());
    }

    #[test]
    fn test_compile_time_matches_flag() {
        assert_eq!(compile_time().is_some(), compiled_with_glibc());
    }

    #[test]
    fn test_runtime_is_non_empty_when_compiled_with_glibc() {
        if compiled_with_glibc() {
            let s = runtime().expect("glibc build must expose gnu_get_libc_version");
            assert!(!s.is_empty());
            assert!(s.parse::<LibcVersion>().is_ok(), "{}", s);
        }
    }

    #[test]
    fn test_confstr_is_never_empty() {
        if let Some(s) = confstr_version() {
            assert!(!s.is_empty());
            assert!(s.parse::<LibcVersion>().is_ok(), "{}", s);
        }
    }

    #[test]
    fn test_unknown_confstr_key_has_no_value() {
        assert_eq!(confstr_string(-12345), None);
    }
}
