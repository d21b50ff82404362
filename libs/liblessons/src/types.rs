//! Common types used across liblessons

use core::fmt;

/// A file descriptor. This is a lightweight copyable handle.
/// For automatic close-on-drop, wrap in `OwnedFd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Fd(i32);

impl Fd {
    /// Deliberately invalid descriptor, handy for provoking EBADF.
    pub const INVALID: Fd = Fd(-1);

    pub const fn from_raw(raw: i32) -> Self {
        Fd(raw)
    }
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Fd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process ID type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Pid(libc::pid_t);

impl Pid {
    pub const fn from_raw(raw: libc::pid_t) -> Self {
        Pid(raw)
    }
    pub const fn raw(self) -> libc::pid_t {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A file descriptor with RAII close-on-drop semantics.
#[derive(Debug)]
pub struct OwnedFd(Fd);

impl OwnedFd {
    pub fn new(fd: Fd) -> Self {
        OwnedFd(fd)
    }
    pub fn fd(&self) -> Fd {
        self.0
    }

    /// Consume self and return the raw Fd without closing.
    pub fn into_raw(self) -> Fd {
        let fd = self.0;
        core::mem::forget(self);
        fd
    }
}

impl Drop for OwnedFd {
    fn drop(&mut self) {
        // Close errors are not actionable here.
        let _ = crate::io::close(self.0);
    }
}
