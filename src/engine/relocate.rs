//! Relocator and the run driver.
//!
//! A run validates the root, then pulls candidates from the selector one at a
//! time. A live run creates the consolidation directory just before its first
//! move, so a run that finds nothing leaves the tree untouched. Each candidate gets its
//! destination slot resolved against the filesystem as it is *now*, after every
//! earlier move of the run has completed.

use anyhow::Result;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::config::{validate_and_normalize, Config};
use crate::errors::ConsolidateError;
use crate::fs_ops::{move_entry, resolve_destination};

use super::candidate::Candidate;
use super::report::{Accountant, RelocationReport};
use super::select::Selector;

/// Where a dry run says a candidate would land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedSlot {
    /// First candidate with this name: the slot the live loop would pick right now.
    Exact { dest: PathBuf, renamed: bool },
    /// A candidate with the same name was already planned. Nothing has moved, so
    /// the exact counter cannot be known; only that a rename will happen.
    Renamed,
}

/// Outcome for one candidate.
#[derive(Debug)]
pub enum Action {
    Moved {
        src: PathBuf,
        dest: PathBuf,
        renamed: bool,
    },
    WouldMove {
        src: PathBuf,
        slot: PlannedSlot,
    },
    Failed {
        src: PathBuf,
        error: ConsolidateError,
    },
}

pub struct Relocator {
    dest_dir: PathBuf,
    dry_run: bool,
    planned_names: HashSet<OsString>,
}

impl Relocator {
    pub fn new(dest_dir: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            dest_dir: dest_dir.into(),
            dry_run,
            planned_names: HashSet::new(),
        }
    }

    /// Resolve the slot for `candidate` and move it there (or report the plan).
    /// Move failures are captured in the returned action, never propagated.
    pub fn relocate(&mut self, candidate: &Candidate) -> Action {
        let src = candidate.path().to_path_buf();

        if self.dry_run {
            if !self.planned_names.insert(candidate.original_name().to_os_string()) {
                debug!(src = %src.display(), "dry-run: same name already planned; would be renamed");
                return Action::WouldMove {
                    src,
                    slot: PlannedSlot::Renamed,
                };
            }
            let (dest, n) = resolve_destination(&self.dest_dir, candidate.base(), candidate.ext());
            debug!(src = %src.display(), dest = %dest.display(), "dry-run: would move");
            return Action::WouldMove {
                src,
                slot: PlannedSlot::Exact {
                    dest,
                    renamed: n.is_some(),
                },
            };
        }

        let (dest, n) = resolve_destination(&self.dest_dir, candidate.base(), candidate.ext());
        match move_entry(&src, &dest) {
            Ok(()) => {
                info!(src = %src.display(), dest = %dest.display(), renamed = n.is_some(), "Moved");
                Action::Moved {
                    src,
                    dest,
                    renamed: n.is_some(),
                }
            }
            Err(e) => {
                let error = ConsolidateError::MoveFailed {
                    path: src.clone(),
                    cause: format!("{e:#}"),
                };
                error!(code = error.code(), kind = "move_failed", path = %src.display(), error = %e, "Move failed");
                Action::Failed { src, error }
            }
        }
    }
}

/// Create the consolidation directory if needed. Any failure is fatal.
fn ensure_destination(dest_dir: &Path) -> Result<(), ConsolidateError> {
    if dest_dir.is_dir() {
        debug!(path = %dest_dir.display(), "destination exists");
        return Ok(());
    }
    fs::create_dir_all(dest_dir).map_err(|e| ConsolidateError::DestinationCreateFailed {
        path: dest_dir.to_path_buf(),
        cause: e.to_string(),
    })?;
    info!(path = %dest_dir.display(), "Created destination directory");
    Ok(())
}

/// Run without observing individual actions.
pub fn run(cfg: &Config) -> Result<RelocationReport> {
    run_with(cfg, |_, _| {})
}

/// Run once over `cfg.root`, calling `on_action` after each candidate is handled.
///
/// Fatal errors (`InvalidRoot`, `InvalidExtension`, `InvalidDestName`,
/// `DestinationCreateFailed`) are returned as `Err` before any candidate is
/// moved; per-candidate failures only show up in the report.
pub fn run_with<F>(cfg: &Config, mut on_action: F) -> Result<RelocationReport>
where
    F: FnMut(&Candidate, &Action),
{
    let mut cfg = cfg.clone();
    validate_and_normalize(&mut cfg)?;
    let dest_dir = cfg.dest_dir();

    let mut accountant = Accountant::new(cfg.dry_run);
    let mut relocator = Relocator::new(&dest_dir, cfg.dry_run);
    let mut dest_ready = cfg.dry_run;
    for candidate in Selector::new(&cfg.root, &dest_dir, &cfg.selection) {
        if !dest_ready {
            ensure_destination(&dest_dir)?;
            dest_ready = true;
        }
        let action = relocator.relocate(&candidate);
        accountant.record(&action);
        on_action(&candidate, &action);
    }

    let report = accountant.finish();
    info!(found = report.found(), failed = report.has_failures(), "Run finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_blocked_by_file_is_fatal() {
        let td = tempfile::tempdir().unwrap();
        let dest = td.path().join("EMPTY_FOLDERS");
        fs::write(&dest, "not a dir").unwrap();
        let err = ensure_destination(&dest).unwrap_err();
        assert!(matches!(err, ConsolidateError::DestinationCreateFailed { .. }));
    }

    #[test]
    fn dry_run_marks_second_same_name_as_renamed() {
        let td = tempfile::tempdir().unwrap();
        let dest = td.path().join("All_JSONS");
        let mut r = Relocator::new(&dest, true);
        let a = Candidate::file_if_matches(td.path().join("x/data.json"), ".json").unwrap();
        let b = Candidate::file_if_matches(td.path().join("y/data.json"), ".json").unwrap();

        match r.relocate(&a) {
            Action::WouldMove {
                slot: PlannedSlot::Exact { dest: d, renamed },
                ..
            } => {
                assert_eq!(d, dest.join("data.json"));
                assert!(!renamed);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            r.relocate(&b),
            Action::WouldMove {
                slot: PlannedSlot::Renamed,
                ..
            }
        ));
    }
}
