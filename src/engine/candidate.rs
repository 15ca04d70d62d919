//! Candidate: one filesystem entry chosen for relocation.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// An entry yielded by the selector. Immutable once produced.
///
/// `base + ext` always equals `original_name`; `ext` is empty for directories
/// and carries its leading dot (in the original case) for files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    path: PathBuf,
    kind: EntryKind,
    original_name: OsString,
    base: OsString,
    ext: OsString,
}

impl Candidate {
    pub(crate) fn directory(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_os_string();
        Some(Self {
            kind: EntryKind::Directory,
            base: name.clone(),
            ext: OsString::new(),
            original_name: name,
            path,
        })
    }

    /// Build a file candidate when the name ends with `suffix` (`".json"`, lowercase).
    pub(crate) fn file_if_matches(path: PathBuf, suffix: &str) -> Option<Self> {
        let name = path.file_name()?.to_os_string();
        let (base, ext) = split_matching_suffix(&name, suffix)?;
        Some(Self {
            kind: EntryKind::File,
            original_name: name,
            base,
            ext,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn original_name(&self) -> &OsStr {
        &self.original_name
    }

    /// Name without the matched extension (the whole name for directories).
    pub fn base(&self) -> &OsStr {
        &self.base
    }

    /// Matched extension with its dot, or empty.
    pub fn ext(&self) -> &OsStr {
        &self.ext
    }
}

/// Case-insensitive suffix match that keeps the original spelling of both halves.
/// A name that is nothing but the suffix (".json") is treated like a dotfile:
/// the whole name is the base and the extension is empty.
fn split_matching_suffix(name: &OsStr, suffix: &str) -> Option<(OsString, OsString)> {
    if let Some(s) = name.to_str() {
        if s.len() < suffix.len() {
            return None;
        }
        let split = s.len() - suffix.len();
        if !s.is_char_boundary(split) || s[split..].to_lowercase() != suffix {
            return None;
        }
        if split == 0 {
            return Some((name.to_os_string(), OsString::new()));
        }
        return Some((OsString::from(&s[..split]), OsString::from(&s[split..])));
    }

    // Non-UTF-8 names: only single-component extensions can be matched safely.
    let p = Path::new(name);
    let ext = p.extension()?;
    if suffix[1..].contains('.') || ext.to_string_lossy().to_lowercase() != suffix[1..] {
        return None;
    }
    let mut dotted = OsString::from(".");
    dotted.push(ext);
    Some((p.file_stem()?.to_os_string(), dotted))
}
