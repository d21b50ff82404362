//! libc version probe: three independent ways to ask "which glibc?"

use std::io::{self, Write};

use clap::ValueEnum;
use liblessons::{version, LibcVersion};

/// One detection method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Probe {
    /// `__GLIBC__` / `__GLIBC_MINOR__` from the build-time headers
    CompileTime,
    /// `gnu_get_libc_version()`
    Runtime,
    /// `confstr(_CS_GNU_LIBC_VERSION)`
    Confstr,
}

impl Probe {
    pub const ALL: [Probe; 3] = [Probe::CompileTime, Probe::Runtime, Probe::Confstr];
}

pub const NOT_COMPILED_WITH_GLIBC: &str = "This program has not been compiled with glibc";
pub const NOT_USING_GLIBC: &str = "This system is not using glibc";

/// What a probe found. `None` means the fallback message was printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    CompileTime(Option<LibcVersion>),
    Runtime(Option<String>),
    Confstr(Option<String>),
}

impl Finding {
    /// The finding parsed as a version, when it has one.
    pub fn version(&self) -> Option<LibcVersion> {
        match self {
            Finding::CompileTime(v) => *v,
            Finding::Runtime(s) | Finding::Confstr(s) => s.as_deref()?.parse().ok(),
        }
    }
}

/// Run one probe and print its line.
pub fn run(probe: Probe, out: &mut impl Write) -> io::Result<Finding> {
    match probe {
        Probe::CompileTime => {
            let found = version::compile_time();
            match found {
                Some(v) => writeln!(
                    out,
                    "Libc version (compile-time) detected by __GLIBC__ is : {}.{}",
                    v.major, v.minor
                )?,
                None => writeln!(out, "{}", NOT_COMPILED_WITH_GLIBC)?,
            }
            Ok(Finding::CompileTime(found))
        }
        Probe::Runtime => {
            let found = version::runtime().filter(|s| !s.is_empty());
            match &found {
                Some(s) => writeln!(
                    out,
                    "Libc version (runtime) detected by gnu_get_libc_version is : {}",
                    s
                )?,
                None => writeln!(out, "{}", NOT_COMPILED_WITH_GLIBC)?,
            }
            Ok(Finding::Runtime(found))
        }
        Probe::Confstr => {
            let found = version::confstr_version();
            match &found {
                Some(s) => writeln!(out, "Libc version (runtime) detected by confstr() is : {}", s)?,
                None => writeln!(out, "{}", NOT_USING_GLIBC)?,
            }
            Ok(Finding::Confstr(found))
        }
    }
}

/// Run the given probes in order and warn when build-time headers and the
/// running libc disagree.
pub fn run_all(probes: &[Probe], out: &mut impl Write) -> io::Result<Vec<Finding>> {
    let mut findings = Vec::with_capacity(probes.len());
    for &probe in probes {
        findings.push(run(probe, out)?);
    }

    let compiled = findings.iter().find_map(|f| match f {
        Finding::CompileTime(v) => *v,
        _ => None,
    });
    if let Some(compiled) = compiled {
        for f in &findings {
            if let (Finding::Runtime(_) | Finding::Confstr(_), Some(running)) = (f, f.version()) {
                if !compiled.same_release(&running) {
                    tracing::warn!(
                        %compiled,
                        %running,
                        "built against different glibc headers than the running libc"
                    );
                }
            }
        }
    }
    Ok(findings)
}
