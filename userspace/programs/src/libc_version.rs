//! Detect the C library version three ways
//!
//! compile-time headers, gnu_get_libc_version() and confstr(). Each check
//! prints a version or its own fallback message; none of them is fatal.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use lessons::probe::{run_all, Probe};

/// Report which glibc this program was built against and is running on.
#[derive(Parser)]
#[command(name = "libc_version")]
struct Args {
    /// Run only this check. Repeat to run several, in the order given.
    #[arg(short, long = "probe", value_enum)]
    probes: Vec<Probe>,
}

fn main() -> Result<()> {
    lessons::init_tracing();
    let args = Args::parse();

    let probes = if args.probes.is_empty() {
        Probe::ALL.to_vec()
    } else {
        args.probes
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_all(&probes, &mut out).context("failed to write probe output")?;
    out.flush()?;
    Ok(())
}
