// build.rs
//
// Preprocesses a tiny probe against the target's C headers and records the
// glibc version they declare. Sets `cfg(glibc_headers)` plus the
// LESSONS_GLIBC_MAJOR / LESSONS_GLIBC_MINOR env vars when `__GLIBC__` is
// defined; emits nothing otherwise.

use std::{env, fs, path::PathBuf};

const PROBE: &str = "\
#include <stdio.h>
#ifdef __GLIBC__
LESSONS_GLIBC __GLIBC__ __GLIBC_MINOR__
#endif
";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-check-cfg=cfg(glibc_headers)");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let probe_path = out_dir.join("glibc_probe.c");
    if let Err(e) = fs::write(&probe_path, PROBE) {
        println!("cargo:warning=could not write glibc probe: {}", e);
        return;
    }

    let expanded = match cc::Build::new()
        .file(&probe_path)
        .cargo_metadata(false)
        .try_expand()
    {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("cargo:warning=glibc header probe failed, assuming no glibc: {}", e);
            return;
        }
    };

    let text = String::from_utf8_lossy(&expanded);
    let Some((major, minor)) = parse_probe(&text) else {
        return;
    };

    println!("cargo:rustc-cfg=glibc_headers");
    println!("cargo:rustc-env=LESSONS_GLIBC_MAJOR={}", major);
    println!("cargo:rustc-env=LESSONS_GLIBC_MINOR={}", minor);
}

/// Find the `LESSONS_GLIBC <major> <minor>` line in the preprocessor output.
fn parse_probe(text: &str) -> Option<(u32, u32)> {
    text.lines().find_map(|line| {
        let mut parts = line.split_whitespace();
        if parts.next()? != "LESSONS_GLIBC" {
            return None;
        }
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        Some((major, minor))
    })
}
