//! I/O wrappers

use crate::error::Error;
use crate::syscall::check;
use crate::types::Fd;

/// Write bytes to a file descriptor.
///
/// # Returns
/// Number of bytes written on success.
#[inline]
pub fn write(file: Fd, buf: &[u8]) -> Result<usize, Error> {
    // SAFETY: buf is valid for buf.len() bytes.
    let ret = unsafe { libc::write(file.raw(), buf.as_ptr().cast(), buf.len()) };
    check(ret).map(|n| n as usize).inspect_err(|e| {
        tracing::debug!(fd = file.raw(), error = %e, "write failed");
    })
}

/// Read bytes from a file descriptor.
///
/// # Returns
/// Number of bytes read on success, 0 at end of file.
#[inline]
pub fn read(file: Fd, buf: &mut [u8]) -> Result<usize, Error> {
    // SAFETY: buf is valid for writes of buf.len() bytes.
    let ret = unsafe { libc::read(file.raw(), buf.as_mut_ptr().cast(), buf.len()) };
    check(ret).map(|n| n as usize).inspect_err(|e| {
        tracing::debug!(fd = file.raw(), error = %e, "read failed");
    })
}

/// Close a file descriptor.
#[inline]
pub fn close(file: Fd) -> Result<(), Error> {
    // SAFETY: closing an arbitrary integer is memory safe; a bad value only
    // yields EBADF.
    let ret = unsafe { libc::close(file.raw()) };
    check(ret).map(|_| ())
}
