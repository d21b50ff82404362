//! Process query wrappers

use crate::error::Error;
use crate::syscall::{errno, set_errno};
use crate::types::Pid;

/// Get the current process ID. Cannot fail.
#[inline]
pub fn getpid() -> Pid {
    // SAFETY: getpid has no preconditions.
    Pid::from_raw(unsafe { libc::getpid() })
}

/// Get the parent process ID. Cannot fail, and leaves errno untouched.
#[inline]
pub fn getppid() -> Pid {
    // SAFETY: getppid has no preconditions.
    Pid::from_raw(unsafe { libc::getppid() })
}

/// Raw outcome of a getpriority() call: the return value and the errno
/// observed right after it, with errno cleared beforehand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityCall {
    pub ret: i32,
    pub errno: i32,
}

impl PriorityCall {
    /// Interpret the call. -1 is a legal nice value, so it only means
    /// failure when errno was also set.
    pub fn result(self) -> Result<i32, Error> {
        if self.ret == -1 && self.errno != 0 {
            Err(Error::from_raw(self.errno))
        } else {
            Ok(self.ret)
        }
    }
}

/// Call `getpriority(PRIO_PROCESS, 0)` for the calling process.
///
/// Clears errno first so a -1 return can be told apart from a real error.
pub fn getpriority_raw() -> PriorityCall {
    set_errno(0);
    // SAFETY: getpriority has no memory-safety preconditions.
    let ret = unsafe { libc::getpriority(libc::PRIO_PROCESS, 0) };
    PriorityCall { ret, errno: errno() }
}

/// Nice value of the calling process.
pub fn getpriority() -> Result<i32, Error> {
    getpriority_raw().result()
}
