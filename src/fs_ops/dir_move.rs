//! Directory move implementation.
//! Tries a rename first; on a cross-filesystem error copies the tree (files in
//! parallel) into the destination slot and removes the source. A failed copy
//! removes the partial destination tree and leaves the source untouched.

use anyhow::{anyhow, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::atomic::try_atomic_move;
use super::helpers::io_error_with_help;
use super::io_copy::copy_streaming;
use super::meta::preserve_metadata;
use super::space::ensure_space_for_copy;
use super::util::is_cross_device;

/// Move the directory `src_dir` (with its whole subtree) to `dest`, which must not exist yet.
pub fn move_dir(src_dir: &Path, dest: &Path) -> Result<()> {
    match try_atomic_move(src_dir, dest) {
        Ok(()) => {
            debug!(src = %src_dir.display(), dest = %dest.display(), "Renamed directory atomically");
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            warn!(src = %src_dir.display(), dest = %dest.display(), "cross-filesystem rename; copying tree instead");
            copy_tree_then_remove(src_dir, dest)
        }
        Err(e) => Err(io_error_with_help("rename directory", src_dir)(e)),
    }
}

pub(super) fn copy_tree_then_remove(src_dir: &Path, dest: &Path) -> Result<()> {
    let dest_parent = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;

    // Walk once up front; any unreadable entry aborts before anything is written.
    let mut dirs: Vec<PathBuf> = Vec::new();
    let mut files: Vec<PathBuf> = Vec::new();
    let mut links: Vec<PathBuf> = Vec::new();
    let mut required: u64 = 0;
    for entry in WalkDir::new(src_dir).min_depth(1) {
        let entry = entry.map_err(|e| anyhow!("walk '{}': {}", src_dir.display(), e))?;
        let ft = entry.file_type();
        if ft.is_dir() {
            dirs.push(entry.into_path());
        } else if ft.is_file() {
            required += entry.metadata().map(|m| m.len()).unwrap_or(0);
            files.push(entry.into_path());
        } else {
            links.push(entry.into_path());
        }
    }
    ensure_space_for_copy(dest_parent, required)?;

    fs::create_dir(dest).map_err(io_error_with_help("create destination directory", dest))?;
    if let Err(e) = copy_tree(src_dir, dest, &dirs, &files, &links) {
        let _ = fs::remove_dir_all(dest);
        return Err(e);
    }

    fs::remove_dir_all(src_dir).map_err(io_error_with_help("remove source directory", src_dir))?;
    debug!(src = %src_dir.display(), dest = %dest.display(), "Copied directory tree and removed source");
    Ok(())
}

fn copy_tree(
    src_dir: &Path,
    dest: &Path,
    dirs: &[PathBuf],
    files: &[PathBuf],
    links: &[PathBuf],
) -> Result<()> {
    // WalkDir yields parents before children, so create_dir suffices.
    for d in dirs {
        let target = dest.join(d.strip_prefix(src_dir)?);
        fs::create_dir(&target).map_err(io_error_with_help("create directory", &target))?;
    }

    files.par_iter().try_for_each(|path| -> Result<()> {
        let target = dest.join(path.strip_prefix(src_dir)?);
        let meta = fs::metadata(path).map_err(io_error_with_help("stat file", path))?;
        copy_streaming(path, &target).map_err(io_error_with_help("copy file to destination", &target))?;
        preserve_metadata(&target, &meta);
        Ok(())
    })?;

    for link in links {
        let target = dest.join(link.strip_prefix(src_dir)?);
        copy_link(link, &target)?;
    }
    Ok(())
}

#[cfg(unix)]
fn copy_link(link: &Path, target: &Path) -> Result<()> {
    let pointee = fs::read_link(link).map_err(io_error_with_help("read symlink", link))?;
    std::os::unix::fs::symlink(&pointee, target).map_err(io_error_with_help("create symlink", target))?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_link(link: &Path, _target: &Path) -> Result<()> {
    Err(anyhow!(
        "cannot copy special entry '{}' across filesystems",
        link.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_fallback_moves_whole_tree() {
        let td = tempfile::tempdir().unwrap();
        let src = td.path().join("album");
        fs::create_dir_all(src.join("sub").join("deeper")).unwrap();
        fs::write(src.join("one.json"), "1").unwrap();
        fs::write(src.join("sub").join("two.json"), "2").unwrap();
        let dest = td.path().join("out");

        copy_tree_then_remove(&src, &dest).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dest.join("one.json")).unwrap(), "1");
        assert_eq!(fs::read_to_string(dest.join("sub/two.json")).unwrap(), "2");
        assert!(dest.join("sub/deeper").is_dir());
    }

    #[test]
    fn copy_fallback_refuses_existing_destination() {
        let td = tempfile::tempdir().unwrap();
        let src = td.path().join("empty");
        fs::create_dir_all(&src).unwrap();
        let dest = td.path().join("taken");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("keep.txt"), "k").unwrap();

        assert!(copy_tree_then_remove(&src, &dest).is_err());
        assert!(src.exists());
        assert_eq!(fs::read_to_string(dest.join("keep.txt")).unwrap(), "k");
    }

    #[test]
    fn rename_moves_empty_dir() {
        let td = tempfile::tempdir().unwrap();
        let src = td.path().join("empty");
        fs::create_dir_all(&src).unwrap();
        let dest = td.path().join("moved");
        move_dir(&src, &dest).unwrap();
        assert!(!src.exists());
        assert!(dest.is_dir());
    }
}
