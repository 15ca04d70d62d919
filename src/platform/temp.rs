//! Staged, no-clobber publishing of new config files.
//!
//! Contents are written to a hidden sibling (`.consolidate.config.tmp.<pid>.<nanos>.<seq>`),
//! fsynced, then hard-linked onto the target name. Linking fails if the name is
//! taken, so an existing config is never replaced. The sibling is always removed.

use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn staging_name(target: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = format!(".consolidate.config.tmp.{pid}.{nanos}.{seq}");
    target.parent().unwrap_or_else(|| Path::new(".")).join(name)
}

/// Publish `contents` at `path`. `create_staged` must create the file exclusively.
pub(super) fn publish_new<F>(path: &Path, contents: &[u8], create_staged: F) -> Result<()>
where
    F: FnOnce(&Path) -> io::Result<File>,
{
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "config path has no parent"))?;
    fs::create_dir_all(parent).with_context(|| format!("create parent '{}'", parent.display()))?;

    let staged = staging_name(path);
    let written = create_staged(&staged).and_then(|mut f| {
        f.write_all(contents)?;
        f.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&staged);
        return Err(e).with_context(|| format!("stage config '{}'", staged.display()));
    }

    let linked = fs::hard_link(&staged, path);
    let _ = fs::remove_file(&staged);
    match linked {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            bail!("Config file already exists: {}", path.display())
        }
        Err(e) => Err(e).with_context(|| format!("publish config '{}'", path.display())),
    }
}
