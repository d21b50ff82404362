//! Turning error codes into text
//!
//! Three flavours, matching what C offers: `strerror` (shared static
//! buffer, copied out immediately), `strerror_r` (caller-provided buffer)
//! and `perror` (straight to stderr).

use std::ffi::{CStr, CString};

/// Buffer size used by callers of [`strerror_r`] in the lessons.
pub const MESSAGE_BUF_LEN: usize = 128;

/// Human-readable message for `code`.
///
/// When libc only has its generic "unknown" text for the code, the result
/// is `Unknown error N` so the number is always present.
pub fn strerror(code: i32) -> String {
    with_numeric_fallback(code, libc_strerror(code))
}

/// libc's own text for `code`, copied out of its static buffer.
fn libc_strerror(code: i32) -> String {
    // SAFETY: strerror returns a pointer to a NUL-terminated string that
    // stays valid until the next strerror call on this thread; we copy it
    // out before returning.
    unsafe {
        let ptr = libc::strerror(code);
        if ptr.is_null() {
            String::new()
        } else {
            CStr::from_ptr(ptr).to_string_lossy().into_owned()
        }
    }
}

/// musl's text for every code it does not know.
const MUSL_UNKNOWN: &str = "No error information";

fn is_generic_unknown(msg: &str) -> bool {
    msg.is_empty() || msg.starts_with("Unknown error") || msg == MUSL_UNKNOWN
}

fn with_numeric_fallback(code: i32, msg: String) -> String {
    if is_generic_unknown(&msg) && !msg.contains(&code.to_string()) {
        format!("Unknown error {}", code)
    } else {
        msg
    }
}

/// Fill `buf` with the message for `code` and return the text written.
///
/// Returns an empty string when libc leaves the buffer empty (for example
/// when it is too small or the code is rejected); callers should fall back
/// to [`strerror`] in that case.
pub fn strerror_r(code: i32, buf: &mut [u8]) -> &str {
    let Some(first) = buf.first_mut() else {
        return "";
    };
    *first = 0;

    // SAFETY: buf is valid for buf.len() bytes; the XSI strerror_r writes a
    // NUL-terminated string no longer than that.
    let rc = unsafe { libc::strerror_r(code, buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        tracing::debug!(code, rc, "strerror_r reported failure");
    }

    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    core::str::from_utf8(&buf[..len]).unwrap_or("")
}

/// Print `prefix: <message for errno>` to stderr, exactly like C's perror.
pub fn perror(prefix: &str) {
    let c_prefix = CString::new(prefix).unwrap_or_default();
    // SAFETY: c_prefix is a valid NUL-terminated string.
    unsafe { libc::perror(c_prefix.as_ptr()) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_code_has_message() {
        let msg = strerror(libc::ENOENT);
        assert!(!msg.is_empty());
        assert!(!msg.starts_with("Unknown error"), "{}", msg);
    }

    #[test]
    fn test_out_of_range_code_includes_number() {
        assert!(strerror(99999).contains("99999"));
        assert!(strerror(-7).contains("-7"));
    }

    #[test]
    fn test_codes_outside_errno_table_keep_libc_text() {
        for code in [libc::ENAMETOOLONG, libc::ELOOP, libc::ETIMEDOUT, libc::ECONNREFUSED] {
            assert_eq!(strerror(code), libc_strerror(code), "code {}", code);
            assert!(!strerror(code).starts_with("Unknown error"), "code {}", code);
        }
    }

    #[test]
    fn test_numeric_fallback_keeps_specific_text() {
        assert_eq!(
            with_numeric_fallback(36, "File name too long".to_string()),
            "File name too long"
        );
    }

    #[test]
    fn test_numeric_fallback_replaces_vague_text() {
        assert_eq!(
            with_numeric_fallback(4242, "No error information".to_string()),
            "Unknown error 4242"
        );
        assert_eq!(
            with_numeric_fallback(4242, "Unknown error 4242".to_string()),
            "Unknown error 4242"
        );
        assert_eq!(with_numeric_fallback(4242, String::new()), "Unknown error 4242");
    }

    #[test]
    fn test_strerror_r_fills_buffer() {
        let mut buf = [0u8; MESSAGE_BUF_LEN];
        let msg = strerror_r(libc::ENOENT, &mut buf).to_string();
        assert!(!msg.is_empty());
        assert_eq!(msg, strerror(libc::ENOENT));
    }

    #[test]
    fn test_strerror_r_empty_buffer_yields_empty() {
        let mut buf = [0u8; 0];
        assert_eq!(strerror_r(libc::ENOENT, &mut buf), "");
    }
}
