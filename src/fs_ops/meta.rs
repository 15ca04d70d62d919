//! Timestamp and permission preservation for copied files.
//! Photo archives are often sorted by mtime, so a cross-device copy must not reset it.

use filetime::{set_file_times, FileTime};
use std::fs::{self, Metadata};
use std::path::Path;
use tracing::debug;

/// Best-effort: copy atime/mtime (and Unix mode bits) from `src_meta` onto `dest`.
pub(super) fn preserve_metadata(dest: &Path, src_meta: &Metadata) {
    let at = FileTime::from_last_access_time(src_meta);
    let mt = FileTime::from_last_modification_time(src_meta);
    if let Err(e) = set_file_times(dest, at, mt) {
        debug!(path = %dest.display(), error = %e, "could not preserve timestamps");
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = src_meta.permissions().mode() & 0o777;
        let _ = fs::set_permissions(dest, fs::Permissions::from_mode(mode));
    }
    #[cfg(not(unix))]
    {
        let _ = fs::set_permissions(dest, src_meta.permissions());
    }
}
