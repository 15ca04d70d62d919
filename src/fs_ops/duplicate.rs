//! Duplicate-name resolution.
//!
//! A destination slot is `base + ext` when free, otherwise the first free
//! `base + " (n)" + ext` for n = 1, 2, 3, ... Existence is checked against the
//! live filesystem on every iteration, so callers must resolve one slot at a time
//! and only after the previous move has completed.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Resolve a collision-free path inside `dst_dir` for `base` + `ext`.
///
/// - `base`: directory name, or file name without the matched extension
/// - `ext`: matched extension including its leading dot, or empty for directories
///
/// Returns the slot and the counter used (`None` when the plain name was free).
///
/// Examples:
/// - ("data", ".json") with data.json taken -> "data (1).json"
/// - ("Album", "") with Album and "Album (1)" taken -> "Album (2)"
pub fn resolve_destination(dst_dir: &Path, base: &OsStr, ext: &OsStr) -> (PathBuf, Option<u64>) {
    let candidate = dst_dir.join(build_name_with_suffix(base, ext, ""));
    if !fs_entry_exists(&candidate) {
        return (candidate, None);
    }

    let mut n: u64 = 1;
    loop {
        let suffix = format!(" ({n})");
        let candidate = dst_dir.join(build_name_with_suffix(base, ext, &suffix));
        if !fs_entry_exists(&candidate) {
            return (candidate, Some(n));
        }
        if n % 100 == 0 {
            trace!(base = ?base, dir = %dst_dir.display(), tried = n, "duplicate: crowded name, still searching");
        }
        n += 1;
    }
}

/// Like `Path::exists`, but a dangling symlink also counts as taken.
fn fs_entry_exists(p: &Path) -> bool {
    p.symlink_metadata().is_ok()
}

// Conservative filename limits (bytes/characters, platform-specific and approximate).
#[cfg(windows)]
const MAX_FILENAME_LEN: usize = 240; // leave headroom for legacy MAX_PATH
#[cfg(not(windows))]
const MAX_FILENAME_LEN: usize = 255; // typical POSIX/EXT limits

/// Measure the approximate length of an OsStr for filename budgeting.
#[cfg(unix)]
fn name_len_units(s: &OsStr) -> usize {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().len()
}

#[cfg(not(unix))]
fn name_len_units(s: &OsStr) -> usize {
    s.to_string_lossy().len()
}

/// Join `base + suffix + ext`, truncating `base` so the result fits MAX_FILENAME_LEN.
fn build_name_with_suffix(base: &OsStr, ext: &OsStr, suffix: &str) -> OsString {
    let overhead = name_len_units(OsStr::new(suffix)) + name_len_units(ext);
    let mut base_os = base.to_os_string();

    if name_len_units(base) + overhead > MAX_FILENAME_LEN {
        let budget = MAX_FILENAME_LEN.saturating_sub(overhead).max(1);
        base_os = truncate_to(base, budget);
    }

    let mut new_name = base_os;
    new_name.push(suffix);
    new_name.push(ext);
    new_name
}

/// Shorten `s` to at most `budget` units, never splitting a UTF-8 character.
fn truncate_to(s: &OsStr, budget: usize) -> OsString {
    if let Some(text) = s.to_str() {
        let mut end = 0;
        for (idx, ch) in text.char_indices() {
            if idx + ch.len_utf8() > budget {
                break;
            }
            end = idx + ch.len_utf8();
        }
        if end == 0 {
            return OsString::from("f");
        }
        return OsString::from(&text[..end]);
    }

    #[cfg(unix)]
    {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};
        let bytes = s.as_bytes();
        OsString::from_vec(bytes[..bytes.len().min(budget)].to_vec())
    }
    #[cfg(not(unix))]
    {
        let lossy = s.to_string_lossy();
        truncate_to(OsStr::new(lossy.as_ref()), budget)
    }
}
