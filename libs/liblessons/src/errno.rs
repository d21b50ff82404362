//! POSIX errno values and their classification
//!
//! Discriminants come straight from the `libc` crate, so they always match
//! the target's own numbering.

use core::fmt;

/// Error numbers set by failing libc calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Errno {
    /// Operation not permitted
    EPERM = libc::EPERM,
    /// No such file or directory
    ENOENT = libc::ENOENT,
    /// No such process
    ESRCH = libc::ESRCH,
    /// Interrupted system call
    EINTR = libc::EINTR,
    /// I/O error
    EIO = libc::EIO,
    /// No such device or address
    ENXIO = libc::ENXIO,
    /// Argument list too long
    E2BIG = libc::E2BIG,
    /// Exec format error
    ENOEXEC = libc::ENOEXEC,
    /// Bad file descriptor
    EBADF = libc::EBADF,
    /// No child processes
    ECHILD = libc::ECHILD,
    /// Resource temporarily unavailable
    EAGAIN = libc::EAGAIN,
    /// Out of memory
    ENOMEM = libc::ENOMEM,
    /// Permission denied
    EACCES = libc::EACCES,
    /// Bad address
    EFAULT = libc::EFAULT,
    /// Block device required
    ENOTBLK = libc::ENOTBLK,
    /// Device or resource busy
    EBUSY = libc::EBUSY,
    /// File exists
    EEXIST = libc::EEXIST,
    /// Cross-device link
    EXDEV = libc::EXDEV,
    /// No such device
    ENODEV = libc::ENODEV,
    /// Not a directory
    ENOTDIR = libc::ENOTDIR,
    /// Is a directory
    EISDIR = libc::EISDIR,
    /// Invalid argument
    EINVAL = libc::EINVAL,
    /// File table overflow
    ENFILE = libc::ENFILE,
    /// Too many open files
    EMFILE = libc::EMFILE,
    /// Not a typewriter
    ENOTTY = libc::ENOTTY,
    /// Text file busy
    ETXTBSY = libc::ETXTBSY,
    /// File too large
    EFBIG = libc::EFBIG,
    /// No space left on device
    ENOSPC = libc::ENOSPC,
    /// Illegal seek
    ESPIPE = libc::ESPIPE,
    /// Read-only file system
    EROFS = libc::EROFS,
    /// Too many links
    EMLINK = libc::EMLINK,
    /// Broken pipe
    EPIPE = libc::EPIPE,
    /// Function not implemented
    ENOSYS = libc::ENOSYS,
    /// Directory not empty
    ENOTEMPTY = libc::ENOTEMPTY,
    /// Address family not supported
    EAFNOSUPPORT = libc::EAFNOSUPPORT,
}

const ALL: [Errno; 35] = [
    Errno::EPERM,
    Errno::ENOENT,
    Errno::ESRCH,
    Errno::EINTR,
    Errno::EIO,
    Errno::ENXIO,
    Errno::E2BIG,
    Errno::ENOEXEC,
    Errno::EBADF,
    Errno::ECHILD,
    Errno::EAGAIN,
    Errno::ENOMEM,
    Errno::EACCES,
    Errno::EFAULT,
    Errno::ENOTBLK,
    Errno::EBUSY,
    Errno::EEXIST,
    Errno::EXDEV,
    Errno::ENODEV,
    Errno::ENOTDIR,
    Errno::EISDIR,
    Errno::EINVAL,
    Errno::ENFILE,
    Errno::EMFILE,
    Errno::ENOTTY,
    Errno::ETXTBSY,
    Errno::EFBIG,
    Errno::ENOSPC,
    Errno::ESPIPE,
    Errno::EROFS,
    Errno::EMLINK,
    Errno::EPIPE,
    Errno::ENOSYS,
    Errno::ENOTEMPTY,
    Errno::EAFNOSUPPORT,
];

impl Errno {
    /// Look up a raw errno value. Returns `None` for numbers this table
    /// does not name.
    pub fn from_raw(val: i32) -> Option<Errno> {
        ALL.iter().copied().find(|e| e.raw() == val)
    }

    /// The raw numeric value.
    #[inline]
    pub const fn raw(self) -> i32 {
        self as i32
    }

    /// Symbolic name, e.g. `"EBADF"`.
    pub const fn name(self) -> &'static str {
        match self {
            Errno::EPERM => "EPERM",
            Errno::ENOENT => "ENOENT",
            Errno::ESRCH => "ESRCH",
            Errno::EINTR => "EINTR",
            Errno::EIO => "EIO",
            Errno::ENXIO => "ENXIO",
            Errno::E2BIG => "E2BIG",
            Errno::ENOEXEC => "ENOEXEC",
            Errno::EBADF => "EBADF",
            Errno::ECHILD => "ECHILD",
            Errno::EAGAIN => "EAGAIN",
            Errno::ENOMEM => "ENOMEM",
            Errno::EACCES => "EACCES",
            Errno::EFAULT => "EFAULT",
            Errno::ENOTBLK => "ENOTBLK",
            Errno::EBUSY => "EBUSY",
            Errno::EEXIST => "EEXIST",
            Errno::EXDEV => "EXDEV",
            Errno::ENODEV => "ENODEV",
            Errno::ENOTDIR => "ENOTDIR",
            Errno::EISDIR => "EISDIR",
            Errno::EINVAL => "EINVAL",
            Errno::ENFILE => "ENFILE",
            Errno::EMFILE => "EMFILE",
            Errno::ENOTTY => "ENOTTY",
            Errno::ETXTBSY => "ETXTBSY",
            Errno::EFBIG => "EFBIG",
            Errno::ENOSPC => "ENOSPC",
            Errno::ESPIPE => "ESPIPE",
            Errno::EROFS => "EROFS",
            Errno::EMLINK => "EMLINK",
            Errno::EPIPE => "EPIPE",
            Errno::ENOSYS => "ENOSYS",
            Errno::ENOTEMPTY => "ENOTEMPTY",
            Errno::EAFNOSUPPORT => "EAFNOSUPPORT",
        }
    }

    /// Short lower-case description used in classification output.
    pub const fn description(self) -> &'static str {
        match self {
            Errno::EPERM => "operation not permitted",
            Errno::ENOENT => "no such file or directory",
            Errno::ESRCH => "no such process",
            Errno::EINTR => "interrupted system call",
            Errno::EIO => "i/o error",
            Errno::ENXIO => "no such device or address",
            Errno::E2BIG => "argument list too long",
            Errno::ENOEXEC => "exec format error",
            Errno::EBADF => "bad file descriptor",
            Errno::ECHILD => "no child processes",
            Errno::EAGAIN => "resource temporarily unavailable",
            Errno::ENOMEM => "out of memory",
            Errno::EACCES => "permission denied",
            Errno::EFAULT => "bad address",
            Errno::ENOTBLK => "block device required",
            Errno::EBUSY => "device or resource busy",
            Errno::EEXIST => "file exists",
            Errno::EXDEV => "cross-device link",
            Errno::ENODEV => "no such device",
            Errno::ENOTDIR => "not a directory",
            Errno::EISDIR => "is a directory",
            Errno::EINVAL => "invalid argument",
            Errno::ENFILE => "file table overflow",
            Errno::EMFILE => "too many open files",
            Errno::ENOTTY => "not a typewriter",
            Errno::ETXTBSY => "text file busy",
            Errno::EFBIG => "file too large",
            Errno::ENOSPC => "no space left on device",
            Errno::ESPIPE => "illegal seek",
            Errno::EROFS => "read-only file system",
            Errno::EMLINK => "too many links",
            Errno::EPIPE => "broken pipe",
            Errno::ENOSYS => "function not implemented",
            Errno::ENOTEMPTY => "directory not empty",
            Errno::EAFNOSUPPORT => "address family not supported",
        }
    }

    /// Which reporting bucket this code falls into.
    pub const fn category(self) -> Category {
        match self {
            Errno::EBADF | Errno::EINVAL => Category::InvalidArgument,
            Errno::ENOENT => Category::NotFound,
            Errno::EACCES | Errno::EPERM => Category::Permission,
            Errno::EINTR => Category::Interrupted,
            _ => Category::Other,
        }
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.description())
    }
}

/// Reporting bucket for an error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Bad descriptor or invalid value
    InvalidArgument,
    /// Missing file or directory
    NotFound,
    /// Permission or privilege failure
    Permission,
    /// Interrupted by a signal
    Interrupted,
    /// Anything not named above
    Other,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::InvalidArgument => "invalid-argument",
            Category::NotFound => "not-found",
            Category::Permission => "permission",
            Category::Interrupted => "interrupted",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a raw code. Unnamed numbers land in [`Category::Other`].
pub fn classify(code: i32) -> Category {
    Errno::from_raw(code).map_or(Category::Other, Errno::category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_roundtrips_every_named_code() {
        for e in ALL {
            assert_eq!(Errno::from_raw(e.raw()), Some(e), "{}", e.name());
        }
    }

    #[test]
    fn test_values_match_linux() {
        assert_eq!(Errno::ENOENT.raw(), 2);
        assert_eq!(Errno::EINTR.raw(), 4);
        assert_eq!(Errno::EBADF.raw(), 9);
        assert_eq!(Errno::EACCES.raw(), 13);
        assert_eq!(Errno::EINVAL.raw(), 22);
    }

    #[test]
    fn test_unknown_codes_are_not_named() {
        assert_eq!(Errno::from_raw(0), None);
        assert_eq!(Errno::from_raw(-1), None);
        assert_eq!(Errno::from_raw(99999), None);
    }

    #[test]
    fn test_bad_descriptor_is_invalid_argument() {
        assert_eq!(classify(libc::EBADF), Category::InvalidArgument);
        assert_eq!(classify(libc::EINVAL), Category::InvalidArgument);
    }

    #[test]
    fn test_lookup_failures_classify_as_not_found_or_permission() {
        assert_eq!(classify(libc::ENOENT), Category::NotFound);
        assert_eq!(classify(libc::EACCES), Category::Permission);
        assert_eq!(classify(libc::EPERM), Category::Permission);
    }

    #[test]
    fn test_everything_else_is_other() {
        assert_eq!(classify(libc::EINTR), Category::Interrupted);
        assert_eq!(classify(libc::EPIPE), Category::Other);
        assert_eq!(classify(99999), Category::Other);
    }

    #[test]
    fn test_display_has_name_and_description() {
        assert_eq!(Errno::EBADF.to_string(), "EBADF: bad file descriptor");
    }
}
