//! Config validation logic.
//! Verifies the root is an existing readable directory, canonicalizes it, and checks
//! the selection filter and consolidation directory name.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path};
use tracing::{debug, error, info};

use crate::errors::ConsolidateError;

use super::types::{Config, SelectionMode};

/// Validate the config and canonicalize `cfg.root` in place.
///
/// Fails with `ConsolidateError::InvalidRoot` when the root is missing or not a
/// directory, and with `InvalidExtension` / `InvalidDestName` for unusable filters.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    ensure_root_is_dir(&cfg.root)?;
    fs::read_dir(&cfg.root).with_context(|| {
        format!("Cannot read root directory '{}'; check permissions", cfg.root.display())
    })?;

    // dunce keeps Windows paths free of the \\?\ prefix so they print and compare cleanly.
    cfg.root = dunce::canonicalize(&cfg.root)
        .map_err(|_| ConsolidateError::InvalidRoot(cfg.root.clone()))?;
    debug!(root = %cfg.root.display(), "root canonicalized");

    if let SelectionMode::FileExtension(ext) = &cfg.selection
        && (ext.is_empty() || ext.contains(['/', '\\']))
    {
        return Err(ConsolidateError::InvalidExtension(ext.clone()).into());
    }

    let name = cfg.dest_name();
    ensure_single_component(&name)?;

    info!(
        "Config validated: root='{}' selection='{}' dest='{}' dry_run={}",
        cfg.root.display(),
        cfg.selection,
        cfg.dest_dir().display(),
        cfg.dry_run
    );
    Ok(())
}

/// Ensure path exists and is a directory.
fn ensure_root_is_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        error!("root is not a directory: {}", path.display());
        return Err(ConsolidateError::InvalidRoot(path.to_path_buf()).into());
    }
    Ok(())
}

/// The consolidation directory must sit directly under the root.
fn ensure_single_component(name: &str) -> Result<()> {
    let mut comps = Path::new(name).components();
    match (comps.next(), comps.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(ConsolidateError::InvalidDestName(name.to_string()).into()),
    }
}
