//! Syscall error-handling lessons
//!
//! Six independent steps. Each performs one or two calls, branches on the
//! result and prints what happened. Failures are expected: every one is
//! classified and printed here and none is propagated. The only error a
//! step returns is a failure to write its own output.
//!
//! Steps run in any order; numbering is teaching order only.

use std::io::{self, Write};

use liblessons::fs::{self, O_CREAT, O_RDONLY, O_TRUNC, O_WRONLY};
use liblessons::process::{self, PriorityCall};
use liblessons::strerror::{self, MESSAGE_BUF_LEN};
use liblessons::syscall::{errno, set_errno};
use liblessons::{io as sysio, Category, Errno, Error, Fd, Pid};

pub const OK_FILE: &str = "build/demo_open_ok.txt";
pub const OK_TEXT: &[u8] = b"demo: write OK\n";
pub const MISSING_FILE: &str = "definitely_not_existing_file_12345.txt";
pub const SWITCH_MISSING_FILE: &str = "nonexistent_file_for_demo_9999.txt";
pub const PROC_MISSING_PATH: &str = "/proc/this_path_does_not_exist_for_demo";
pub const BOGUS_ERRNO: i32 = 99999;

/// One lesson step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Getpid = 1,
    Open = 2,
    ErrnoSwitch = 3,
    ErrnoNotCleared = 4,
    Getpriority = 5,
    Strerror = 6,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Getpid,
        Section::Open,
        Section::ErrnoSwitch,
        Section::ErrnoNotCleared,
        Section::Getpriority,
        Section::Strerror,
    ];

    pub fn from_number(n: u8) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.number() == n)
    }

    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn title(self) -> &'static str {
        match self {
            Section::Getpid => "getpid()",
            Section::Open => "open() success then failure",
            Section::ErrnoSwitch => "error-number handling with switch",
            Section::ErrnoNotCleared => "successful syscall does NOT clear errno",
            Section::Getpriority => "getpriority() (negative valid values possible)",
            Section::Strerror => "perror / strerror demo and Unknown error case",
        }
    }

    /// Print the header and run the step.
    pub fn run(self, out: &mut impl Write) -> io::Result<Report> {
        writeln!(out, "\n=== {}) {} ===", self.number(), self.title())?;
        Ok(match self {
            Section::Getpid => Report::Getpid(getpid_step(out)?),
            Section::Open => Report::Open(open_step(out)?),
            Section::ErrnoSwitch => Report::ErrnoSwitch(errno_switch_step(out)?),
            Section::ErrnoNotCleared => Report::ErrnoNotCleared(errno_not_cleared_step(out)?),
            Section::Getpriority => Report::Getpriority(getpriority_step(out)?),
            Section::Strerror => Report::Strerror(strerror_step(out)?),
        })
    }
}

/// Structured outcome of a step, for callers that want more than text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Getpid(Pid),
    Open(OpenReport),
    ErrnoSwitch(SwitchReport),
    ErrnoNotCleared(Persistence),
    Getpriority(PriorityCall),
    Strerror(FormatReport),
}

/// Step 1: getpid() cannot fail, so there is no error branch.
pub fn getpid_step(out: &mut impl Write) -> io::Result<Pid> {
    let pid = process::getpid();
    writeln!(out, "getpid() -> {}", pid)?;
    Ok(pid)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenReport {
    /// Descriptor and byte count of the create-and-write, or why it failed.
    pub created: Result<(Fd, usize), Error>,
    /// Result of opening a file that should not exist.
    pub missing: Result<Fd, Error>,
}

/// Step 2: create and write a file, then open a file that does not exist.
pub fn open_step(out: &mut impl Write) -> io::Result<OpenReport> {
    let created = match fs::open_with_mode(OK_FILE, O_CREAT | O_WRONLY | O_TRUNC, 0o644) {
        Ok(file) => match sysio::write(file.fd(), OK_TEXT) {
            Ok(n) => {
                writeln!(
                    out,
                    "created and wrote to '{}' (fd={}, bytes={})",
                    OK_FILE,
                    file.fd(),
                    n
                )?;
                Ok((file.fd(), n))
            }
            Err(e) => {
                writeln!(out, "write() returned -1, errno={}", code_of(&e))?;
                Err(e)
            }
        },
        Err(e) => {
            writeln!(out, "open('{}') failed: errno={}", OK_FILE, code_of(&e))?;
            Err(e)
        }
    };

    let missing = match fs::open(MISSING_FILE, O_RDONLY) {
        Ok(file) => {
            writeln!(out, "unexpectedly opened '{}' (fd={})", MISSING_FILE, file.fd())?;
            Ok(file.fd())
        }
        Err(e) => {
            writeln!(
                out,
                "open('{}') failed: returned -1, errno={}",
                MISSING_FILE,
                code_of(&e)
            )?;
            Err(e)
        }
    };

    Ok(OpenReport { created, missing })
}

/// A failed call's code and its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub code: i32,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchReport {
    /// `None` if read(-1) unexpectedly succeeded.
    pub read: Option<Classified>,
    /// `None` if the missing file unexpectedly opened.
    pub open: Option<Classified>,
}

/// Step 3: provoke EBADF and ENOENT and branch on the code.
pub fn errno_switch_step(out: &mut impl Write) -> io::Result<SwitchReport> {
    let mut buf = [0u8; 8];
    let read = match sysio::read(Fd::INVALID, &mut buf) {
        Ok(_) => {
            writeln!(out, "read(-1,...) unexpectedly succeeded")?;
            None
        }
        Err(e) => {
            let code = code_of(&e);
            writeln!(out, "read(-1,...) returned -1, errno={}", code)?;
            Some(classify_and_print(out, code)?)
        }
    };

    let open = match fs::open(SWITCH_MISSING_FILE, O_RDONLY) {
        Ok(_file) => {
            writeln!(out, "open(nonexistent) unexpectedly succeeded")?;
            None
        }
        Err(e) => {
            let code = code_of(&e);
            writeln!(out, "open(nonexistent) returned -1, errno={}", code)?;
            Some(classify_and_print(out, code)?)
        }
    };

    Ok(SwitchReport { read, open })
}

fn classify_and_print(out: &mut impl Write, code: i32) -> io::Result<Classified> {
    let category = liblessons::classify(code);
    match Errno::from_raw(code) {
        Some(e) if category != Category::Other => {
            writeln!(out, "  {}: {}", e.name(), e.description())?
        }
        _ => writeln!(out, "  Other errno: {}", code)?,
    }
    Ok(Classified { code, category })
}

/// errno before and after a successful call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persistence {
    pub before: i32,
    pub after: i32,
}

/// The sentinel step 4 plants in errno.
pub const SENTINEL: i32 = Errno::EINVAL.raw();

/// Step 4: a successful call leaves a stale errno in place.
pub fn errno_not_cleared_step(out: &mut impl Write) -> io::Result<Persistence> {
    set_errno(SENTINEL);
    let before = errno();
    let _ = process::getppid();
    let after = errno();

    writeln!(out, "errno set to {} BEFORE calling getppid()", before)?;
    writeln!(out, "after getppid(), errno still = {} (not cleared by success)", after)?;
    writeln!(out, "=> always check the syscall return value, not errno alone")?;
    Ok(Persistence { before, after })
}

/// Step 5: -1 is a valid priority; only -1 with errno set is an error.
pub fn getpriority_step(out: &mut impl Write) -> io::Result<PriorityCall> {
    let call = process::getpriority_raw();
    match call.result() {
        Err(_) => writeln!(
            out,
            "getpriority() returned -1 and errno={} -> real error",
            call.errno
        )?,
        Ok(nice) => writeln!(out, "getpriority() -> {} (valid result)", nice)?,
    }
    Ok(call)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatReport {
    /// Code reported by perror, if the /proc open failed as intended.
    pub perror_code: Option<i32>,
    pub enoent: String,
    pub unknown: String,
    pub reentrant: String,
    /// True when strerror_r left the buffer empty and strerror was used.
    pub reentrant_fell_back: bool,
}

/// Step 6: perror, strerror and strerror_r, including unknown codes.
pub fn strerror_step(out: &mut impl Write) -> io::Result<FormatReport> {
    let perror_code = match fs::open(PROC_MISSING_PATH, O_RDONLY) {
        Ok(_file) => None,
        Err(e) => {
            let code = code_of(&e);
            // perror goes straight to stderr; flush ours first so the
            // lines interleave in order.
            out.flush()?;
            set_errno(code);
            strerror::perror("perror: open failed");
            writeln!(out, "strerror(errno) -> {}", strerror::strerror(code))?;
            Some(code)
        }
    };

    let enoent = strerror::strerror(Errno::ENOENT.raw());
    writeln!(out, "\nstrerror(ENOENT) -> {}", enoent)?;

    let unknown = strerror::strerror(BOGUS_ERRNO);
    writeln!(out, "strerror({}) -> {}", BOGUS_ERRNO, unknown)?;

    let mut buf = [0u8; MESSAGE_BUF_LEN];
    let filled = strerror::strerror_r(Errno::ENOENT.raw(), &mut buf).to_string();
    let (reentrant, reentrant_fell_back) = if filled.is_empty() {
        let fallback = strerror::strerror(Errno::ENOENT.raw());
        writeln!(out, "strerror_r left buf empty, fallback -> {}", fallback)?;
        (fallback, true)
    } else {
        writeln!(out, "strerror_r(ENOENT) -> {}", filled)?;
        (filled, false)
    };

    Ok(FormatReport {
        perror_code,
        enoent,
        unknown,
        reentrant,
        reentrant_fell_back,
    })
}

/// Numeric code for printing. Non-errno errors never reach the steps, but
/// report as 0 rather than panicking.
fn code_of(e: &Error) -> i32 {
    e.code().unwrap_or(0)
}

/// Run the given steps in order between the banner and the closing line.
pub fn run_sections(sections: &[Section], out: &mut impl Write) -> io::Result<Vec<Report>> {
    writeln!(out, "Simple syscall error-handling demo")?;
    let mut reports = Vec::with_capacity(sections.len());
    for &section in sections {
        tracing::debug!(section = section.number(), "running step");
        reports.push(section.run(out)?);
    }
    writeln!(out, "\nEnd")?;
    Ok(reports)
}
