//! End-to-end checks for the libc_version binary

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_libc_version"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn libc_version")
}

fn parse_major_minor(s: &str) -> Option<(u32, u32)> {
    let (major, minor) = s.trim().split_once('.')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}

#[test]
fn test_three_lines_and_zero_exit() {
    let output = run(&[]);
    assert!(output.status.success(), "exit status: {:?}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 3, "{}", stdout);
}

#[test]
fn test_compile_time_line_has_numeric_version_or_fallback() {
    let output = run(&["--probe", "compile-time"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().next().expect("no output");

    match line.split_once("detected by __GLIBC__ is : ") {
        Some((_, version)) => {
            assert!(parse_major_minor(version).is_some(), "not M.m: {}", line)
        }
        None => assert_eq!(line, "This program has not been compiled with glibc"),
    }
}

#[test]
fn test_confstr_line_never_empty() {
    let output = run(&["-p", "confstr"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().next().expect("no output");

    match line.split_once("detected by confstr() is : ") {
        Some((_, value)) => assert!(!value.trim().is_empty(), "{}", line),
        None => assert_eq!(line, "This system is not using glibc"),
    }
}

#[test]
fn test_runtime_line_non_empty_when_compile_time_glibc() {
    let compile = run(&["-p", "compile-time"]);
    if !String::from_utf8_lossy(&compile.stdout).contains("__GLIBC__") {
        return;
    }

    let output = run(&["-p", "runtime"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let (_, value) = stdout
        .trim_end()
        .split_once("detected by gnu_get_libc_version is : ")
        .expect("glibc build must report a runtime version");
    assert!(!value.is_empty());
}

#[test]
fn test_unknown_probe_is_rejected() {
    assert!(!run(&["--probe", "uname"]).status.success());
}
