//! I/O helper utilities.
//!
//! Enriches io::Error with the operation, the path and a platform-aware hint
//! so per-candidate failures read well in the final log.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create dir", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

#[cfg(unix)]
use libc;

/// Format a human-friendly message with op/path plus platform-aware hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        // Platform-specific hints by raw OS code.
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" | hint: permission denied; check ownership and write permissions.");
                }
                libc::EXDEV => {
                    msg.push_str(" | hint: cross-filesystem; atomic rename not possible.");
                }
                libc::EBUSY => {
                    msg.push_str(" | hint: resource busy; ensure no other process is writing.");
                }
                libc::ENOENT => {
                    msg.push_str(" | hint: path not found; verify it exists.");
                }
                libc::EEXIST => {
                    msg.push_str(" | hint: already exists; pick a unique name or remove the target.");
                }
                libc::ENOSPC => {
                    msg.push_str(" | hint: insufficient space on device.");
                }
                libc::EROFS => {
                    msg.push_str(" | hint: read-only filesystem; cannot write here.");
                }
                libc::ELOOP => {
                    msg.push_str(" | hint: too many symbolic link levels (ELOOP); possible symlink cycle.");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" | hint: filename or path too long; shorten path segments.");
                }
                libc::EMFILE => {
                    msg.push_str(" | hint: process file descriptor limit reached; close files or raise limits.");
                }
                libc::ENFILE => {
                    msg.push_str(" | hint: system-wide file table overflow; reduce open files.");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            // Common Win32 errors
            match code {
                5 => msg.push_str(" | hint: access denied; check permissions."),          // ERROR_ACCESS_DENIED
                17 => msg.push_str(" | hint: not same device; cross-filesystem move."),   // ERROR_NOT_SAME_DEVICE
                32 => msg.push_str(" | hint: sharing violation; file is in use."),        // ERROR_SHARING_VIOLATION
                2 | 3 => msg.push_str(" | hint: path not found; verify it exists."),      // FILE/ PATH NOT FOUND
                80 => msg.push_str(" | hint: already exists; pick a unique name."),       // ERROR_FILE_EXISTS
                112 => msg.push_str(" | hint: insufficient disk space."),                 // ERROR_DISK_FULL
                19 => msg.push_str(" | hint: write protected / read-only media."),        // ERROR_WRITE_PROTECT
                206 => msg.push_str(" | hint: filename or path too long (MAX_PATH exceeded)."), // ERROR_FILENAME_EXCED_RANGE
                4 => msg.push_str(" | hint: too many open files; close handles or increase limit."), // ERROR_TOO_MANY_OPEN_FILES
                _ => {}
            }
        }
        // Include OS code for diagnostics
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        // Fallback to Kind-based hints
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" | hint: permission denied; check ownership and write permissions.");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" | hint: path not found; verify it exists.");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" | hint: already exists; remove or choose a unique name.");
            }
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
                msg.push_str(" | hint: busy/timed out; retry after the current write finishes.");
            }
            _ => {}
        }
    }

    msg
}

/// Adapter for anyhow::Result code.
/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub(crate) fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_operation_and_path() {
        let e = io::Error::from(io::ErrorKind::NotFound);
        let err = io_error_with_help("rename", Path::new("/tree/a.json"))(e);
        let msg = err.to_string();
        assert!(msg.starts_with("rename '/tree/a.json'"), "{msg}");
        assert!(msg.contains("path not found"), "{msg}");
    }

    #[cfg(unix)]
    #[test]
    fn raw_os_errors_carry_code() {
        let e = io::Error::from_raw_os_error(libc::EACCES);
        let msg = io_error_with_help("move", Path::new("/x"))(e).to_string();
        assert!(msg.contains("permission denied"), "{msg}");
        assert!(msg.contains(&format!("[os code: {}]", libc::EACCES)), "{msg}");
    }
}
