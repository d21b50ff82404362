//! liblessons: typed wrappers over the libc calls used by the lessons
//!
//! Every fallible wrapper returns `Result<T, Error>`, where the error is the
//! errno captured immediately after the failing call. Programs match on
//! that value instead of re-reading the process-wide errno later.
//!
//! Only [`syscall::errno`] and [`syscall::set_errno`] touch errno directly;
//! they exist for the lessons that are about errno itself.
//!
//! # Usage
//!
//! ```rust,ignore
//! use liblessons::fs::{open, O_RDONLY};
//!
//! match open("missing.txt", O_RDONLY) {
//!     Ok(file) => println!("opened fd={}", file.fd()),
//!     Err(e) => println!("open failed: {} [{}]", e, e.category()),
//! }
//! ```

// Re-export all public APIs
pub use errno::{classify, Category, Errno};
pub use error::Error;
pub use types::*;
pub use version::LibcVersion;

pub mod errno;
pub mod error;
pub mod fs;
pub mod io;
pub mod process;
pub mod strerror;
pub mod syscall;
pub mod types;
pub mod version;
