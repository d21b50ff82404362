//! Lesson steps shared by the `libc_version` and `syscall_errors` binaries.

pub mod errors;
pub mod probe;

use tracing_subscriber::EnvFilter;

/// Route diagnostics to stderr so stdout carries only the lesson text.
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
