//! Raw errno access and return-value checking
//!
//! libc reports failure through the return value (usually -1) and leaves the
//! reason in the thread's errno slot. Wrappers in this crate call
//! [`check`] right after the libc call so the code is captured before
//! anything else can overwrite it.

use crate::error::Error;

/// Read the calling thread's errno.
#[inline]
pub fn errno() -> i32 {
    // SAFETY: __errno_location always returns a valid pointer to the
    // calling thread's errno.
    unsafe { *libc::__errno_location() }
}

/// Overwrite the calling thread's errno.
#[inline]
pub fn set_errno(value: i32) {
    // SAFETY: see `errno`.
    unsafe {
        *libc::__errno_location() = value;
    }
}

/// Return types libc uses for "-1 means failure".
pub trait MinusOne: Copy {
    fn is_minus_one(self) -> bool;
}

macro_rules! impl_minus_one {
    ($($t:ty)*) => ($(impl MinusOne for $t {
        #[inline]
        fn is_minus_one(self) -> bool {
            self == -1
        }
    })*)
}

impl_minus_one! { i32 i64 isize }

/// Convert a libc return value to `Result`, capturing errno on failure.
#[inline]
pub fn check<T: MinusOne>(ret: T) -> Result<T, Error> {
    if ret.is_minus_one() {
        Err(Error::last_os_error())
    } else {
        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errno::Errno;

    #[test]
    fn test_set_errno_is_visible_to_errno() {
        set_errno(libc::EINVAL);
        assert_eq!(errno(), libc::EINVAL);
        set_errno(0);
        assert_eq!(errno(), 0);
    }

    #[test]
    fn test_check_passes_through_success() {
        assert_eq!(check(0i32).ok(), Some(0));
        assert_eq!(check(42isize).ok(), Some(42));
    }

    #[test]
    fn test_check_captures_errno_on_minus_one() {
        set_errno(libc::EBADF);
        match check(-1i32) {
            Err(Error::Os(e)) => assert_eq!(e, Errno::EBADF),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_other_negative_values_are_success() {
        assert_eq!(check(-2i64).ok(), Some(-2));
    }
}
