//! Windows implementations of platform helpers. No ACL management; POSIX modes are no-ops.

use anyhow::Result;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use super::temp::publish_new;

/// Open a log file for appending, creating it and its parent if needed.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Publish a new config file; fails if `path` already exists.
pub fn write_config_secure_new_0600(path: &Path, contents: &[u8]) -> Result<()> {
    publish_new(path, contents, |staged| {
        OpenOptions::new().write(true).create_new(true).open(staged)
    })
}

pub fn set_dir_mode_0700(_path: &Path) -> io::Result<()> {
    Ok(())
}

pub fn set_file_mode_0600(_path: &Path) -> io::Result<()> {
    Ok(())
}
