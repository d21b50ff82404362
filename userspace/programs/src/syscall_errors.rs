//! Syscall error-handling demo
//!
//! Runs the six error-handling steps in order, or only the ones picked with
//! `--section`. Exit status is 0 regardless of what the steps provoke; the
//! failures are the point.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use lessons::errors::{run_sections, Section};

/// Walk through errno inspection, error formatting and its edge cases.
#[derive(Parser)]
#[command(name = "syscall_errors")]
struct Args {
    /// Run only this step (1-6). Repeat to run several, in the order given.
    #[arg(short, long = "section", value_parser = clap::value_parser!(u8).range(1..=6))]
    sections: Vec<u8>,

    /// List the steps and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    lessons::init_tracing();
    let args = Args::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list {
        for s in Section::ALL {
            writeln!(out, "{}) {}", s.number(), s.title())?;
        }
        return Ok(());
    }

    let sections: Vec<Section> = if args.sections.is_empty() {
        Section::ALL.to_vec()
    } else {
        args.sections.iter().filter_map(|&n| Section::from_number(n)).collect()
    };

    run_sections(&sections, &mut out).context("failed to write lesson output")?;
    out.flush()?;
    Ok(())
}
