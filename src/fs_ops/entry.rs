use anyhow::{anyhow, bail, Result};
use std::fs;
use std::path::Path;
use tracing::trace;

use super::dir_move::move_dir;
use super::file_move::move_file;

/// Move one filesystem entry to a destination slot that is currently free.
/// - Stats once with `symlink_metadata` and branches on the file type.
/// - Refuses symlinks and special files; the selector never yields them.
/// - Refuses an occupied destination instead of replacing it.
pub fn move_entry(src: &Path, dest: &Path) -> Result<()> {
    let lmeta = fs::symlink_metadata(src).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow!("Source does not exist: {}", src.display())
        } else {
            e.into()
        }
    })?;
    if fs::symlink_metadata(dest).is_ok() {
        bail!("Destination already exists: {}", dest.display());
    }

    let ftype = lmeta.file_type();
    trace!(path = %src.display(), is_file = ftype.is_file(), is_dir = ftype.is_dir(), "dispatch move_entry");

    if ftype.is_symlink() {
        bail!("Refusing to move symlink: {}", src.display());
    } else if ftype.is_file() {
        move_file(src, dest)
    } else if ftype.is_dir() {
        move_dir(src, dest)
    } else {
        bail!(
            "Source path is neither a regular file nor a directory: {}",
            src.display()
        )
    }
}
