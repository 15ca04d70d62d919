//! File move implementation.
//! Attempts an atomic rename; on a cross-filesystem error only, streams a copy into
//! the (still free) destination slot, preserves timestamps, then removes the source.

use anyhow::{anyhow, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::atomic::try_atomic_move;
use super::helpers::io_error_with_help;
use super::io_copy::copy_streaming;
use super::meta::preserve_metadata;
use super::space::ensure_space_for_copy;
use super::util::is_cross_device;

/// Move a single file to `dest`, which must not exist yet.
pub fn move_file(src: &Path, dest: &Path) -> Result<()> {
    match try_atomic_move(src, dest) {
        Ok(()) => {
            debug!(src = %src.display(), dest = %dest.display(), "Renamed file atomically");
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            warn!(src = %src.display(), dest = %dest.display(), "cross-filesystem rename; copying instead");
            copy_file_then_remove(src, dest)
        }
        Err(e) => Err(io_error_with_help("rename file", src)(e)),
    }
}

pub(super) fn copy_file_then_remove(src: &Path, dest: &Path) -> Result<()> {
    let meta = fs::metadata(src).map_err(io_error_with_help("stat source file", src))?;
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;
    ensure_space_for_copy(dest_dir, meta.len())?;

    if let Err(e) = copy_streaming(src, dest) {
        // create_new failed => the slot was taken by someone else; leave it alone.
        if e.kind() != std::io::ErrorKind::AlreadyExists {
            let _ = fs::remove_file(dest);
        }
        return Err(io_error_with_help("copy file to destination", dest)(e));
    }
    preserve_metadata(dest, &meta);

    fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
    debug!(src = %src.display(), dest = %dest.display(), "Copied file and removed source");
    Ok(())
}
