//! Filesystem wrappers
//!
//! - open: Open a file and get an owned file descriptor

use std::ffi::CString;

use crate::error::Error;
use crate::syscall::check;
use crate::types::{Fd, OwnedFd};

/// Open flags
pub const O_RDONLY: i32 = libc::O_RDONLY;
pub const O_WRONLY: i32 = libc::O_WRONLY;
pub const O_CREAT: i32 = libc::O_CREAT;
pub const O_TRUNC: i32 = libc::O_TRUNC;

/// Open a file without creating it.
///
/// # Example
/// ```ignore
/// let file = open("/etc/hostname", O_RDONLY)?;
/// ```
#[inline]
pub fn open(path: &str, flags: i32) -> Result<OwnedFd, Error> {
    open_with_mode(path, flags, 0)
}

/// Open a file with mode (for O_CREAT).
///
/// # Arguments
/// * `path` - Path to the file; must not contain NUL
/// * `flags` - Open flags (O_RDONLY, O_WRONLY, O_CREAT, etc.)
/// * `mode` - File permissions if creating (e.g., 0o644)
pub fn open_with_mode(path: &str, flags: i32, mode: u32) -> Result<OwnedFd, Error> {
    let c_path = CString::new(path).map_err(|_| Error::NulInPath)?;
    // SAFETY: c_path is a valid NUL-terminated string for the call's duration.
    let ret = unsafe { libc::open(c_path.as_ptr(), flags, mode as libc::c_uint) };
    match check(ret) {
        Ok(fd) => Ok(OwnedFd::new(Fd::from_raw(fd))),
        Err(e) => {
            tracing::debug!(path, flags, error = %e, "open failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errno::{Category, Errno};

    #[test]
    fn test_open_missing_file_is_enoent() {
        let err = open("definitely/not/here/lesson.txt", O_RDONLY).unwrap_err();
        assert_eq!(err, Error::Os(Errno::ENOENT));
    }

    #[test]
    fn test_open_missing_file_classifies_as_lookup_failure() {
        let err = open("nonexistent_file_for_unit_test.txt", O_RDONLY).unwrap_err();
        assert!(matches!(err.category(), Category::NotFound | Category::Permission));
    }

    #[test]
    fn test_interior_nul_is_rejected_before_the_call() {
        assert_eq!(open("bad\0path", O_RDONLY).unwrap_err(), Error::NulInPath);
    }

    #[test]
    fn test_create_write_and_reopen() {
        let dir = std::env::temp_dir().join(format!("liblessons-fs-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("created.txt");
        let path = path.to_str().unwrap();

        let file = open_with_mode(path, O_CREAT | O_WRONLY | O_TRUNC, 0o644).unwrap();
        assert_eq!(crate::io::write(file.fd(), b"hello\n"), Ok(6));
        drop(file);

        let file = open(path, O_RDONLY).unwrap();
        let mut buf = [0u8; 16];
        assert_eq!(crate::io::read(file.fd(), &mut buf), Ok(6));
        drop(file);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
