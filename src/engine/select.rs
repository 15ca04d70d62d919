//! Selector: a lazy, single-pass walk yielding candidates in a deterministic order.
//!
//! - Empty-directory mode walks post-order (children before parents) and judges
//!   emptiness when a directory is left, by re-listing it. Entries already yielded
//!   in this run count as gone, so a parent whose only children were empty
//!   directories is yielded too, in dry and live runs alike.
//! - File mode walks top-down with walkdir.
//! - Siblings are visited in file-name order. The consolidation directory is
//!   pruned by path and never yielded; the root itself is never yielded.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::SelectionMode;

use super::candidate::Candidate;

pub struct Selector {
    inner: Walk,
}

enum Walk {
    EmptyDirs(EmptyDirWalk),
    Files(FileWalk),
}

impl Selector {
    /// `dest` is the consolidation directory; it is excluded by path comparison,
    /// so it must be built from the same `root` value the walk starts at.
    pub fn new(root: &Path, dest: &Path, mode: &SelectionMode) -> Self {
        let inner = match mode {
            SelectionMode::EmptyDirectories => Walk::EmptyDirs(EmptyDirWalk::new(root, dest)),
            SelectionMode::FileExtension(ext) => Walk::Files(FileWalk::new(root, dest, ext)),
        };
        Self { inner }
    }
}

impl Iterator for Selector {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        match &mut self.inner {
            Walk::EmptyDirs(w) => w.next(),
            Walk::Files(w) => w.next(),
        }
    }
}

struct Frame {
    dir: PathBuf,
    pending: std::vec::IntoIter<PathBuf>,
}

struct EmptyDirWalk {
    stack: Vec<Frame>,
    dest: PathBuf,
    yielded: HashSet<PathBuf>,
}

impl EmptyDirWalk {
    fn new(root: &Path, dest: &Path) -> Self {
        let mut walk = Self {
            stack: Vec::new(),
            dest: dest.to_path_buf(),
            yielded: HashSet::new(),
        };
        let pending = walk.subdirs(root);
        walk.stack.push(Frame {
            dir: root.to_path_buf(),
            pending,
        });
        walk
    }

    /// Real (non-symlink) subdirectories of `dir`, sorted, minus the destination.
    fn subdirs(&self, dir: &Path) -> std::vec::IntoIter<PathBuf> {
        let rd = match fs::read_dir(dir) {
            Ok(rd) => rd,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "cannot list directory; skipping its subtree");
                return Vec::new().into_iter();
            }
        };
        let mut out: Vec<PathBuf> = rd
            .filter_map(Result::ok)
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|e| e.path())
            .filter(|p| *p != self.dest)
            .collect();
        out.sort();
        out.into_iter()
    }

    /// Evaluated when the walk leaves `dir`: empty if every remaining entry was
    /// already yielded. Unreadable directories are never empty.
    fn is_empty_now(&self, dir: &Path) -> bool {
        let rd = match fs::read_dir(dir) {
            Ok(rd) => rd,
            Err(e) => {
                // Already warned about when its subtree was skipped.
                debug!(path = %dir.display(), error = %e, "cannot list directory; treating as non-empty");
                return false;
            }
        };
        for entry in rd {
            match entry {
                Ok(e) if self.yielded.contains(&e.path()) => continue,
                _ => return false,
            }
        }
        true
    }

    fn next(&mut self) -> Option<Candidate> {
        loop {
            let child = self.stack.last_mut()?.pending.next();
            if let Some(child) = child {
                let pending = self.subdirs(&child);
                self.stack.push(Frame {
                    dir: child,
                    pending,
                });
                continue;
            }

            let frame = self.stack.pop()?;
            if self.stack.is_empty() {
                // Left the root: walk finished.
                return None;
            }
            if self.is_empty_now(&frame.dir) {
                trace!(path = %frame.dir.display(), "empty directory");
                self.yielded.insert(frame.dir.clone());
                if let Some(c) = Candidate::directory(frame.dir) {
                    return Some(c);
                }
            }
        }
    }
}

struct FileWalk {
    it: Box<dyn Iterator<Item = walkdir::Result<DirEntry>>>,
    suffix: String,
}

impl FileWalk {
    fn new(root: &Path, dest: &Path, ext: &str) -> Self {
        let dest = dest.to_path_buf();
        // sort_by_file_name reads each directory fully before yielding from it,
        // so moving files out mid-walk does not disturb the listing.
        let it = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| e.path() != dest);
        Self {
            it: Box::new(it),
            suffix: format!(".{ext}"),
        }
    }

    fn next(&mut self) -> Option<Candidate> {
        loop {
            let entry = match self.it.next()? {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "walk error; skipping entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(c) = Candidate::file_if_matches(entry.into_path(), &self.suffix) {
                return Some(c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(root: &Path, mode: &SelectionMode) -> Vec<PathBuf> {
        let dest = root.join("DEST");
        Selector::new(root, &dest, mode)
            .map(|c| c.path().strip_prefix(root).unwrap().to_path_buf())
            .collect()
    }

    #[test]
    fn nested_empty_dirs_are_yielded_deepest_first() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        assert_eq!(
            names(root, &SelectionMode::EmptyDirectories),
            vec![PathBuf::from("a/b/c"), PathBuf::from("a/b"), PathBuf::from("a")]
        );
    }

    #[test]
    fn unlistable_directory_is_never_empty() {
        let td = tempfile::tempdir().unwrap();
        let walk = EmptyDirWalk::new(td.path(), &td.path().join("DEST"));
        assert!(!walk.is_empty_now(&td.path().join("vanished")));
        assert_eq!(walk.subdirs(&td.path().join("vanished")).len(), 0);
    }

    #[test]
    fn dest_dir_is_pruned_and_root_never_yielded() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        fs::create_dir_all(root.join("DEST/inner")).unwrap();
        assert!(names(root, &SelectionMode::EmptyDirectories).is_empty());
    }

    #[test]
    fn files_match_case_insensitively_in_sorted_order() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("b/x.json"), "1").unwrap();
        fs::write(root.join("a/Y.JSON"), "2").unwrap();
        fs::write(root.join("a/z.jpg"), "3").unwrap();
        assert_eq!(
            names(root, &SelectionMode::file_extension("json")),
            vec![PathBuf::from("a/Y.JSON"), PathBuf::from("b/x.json")]
        );
    }
}
