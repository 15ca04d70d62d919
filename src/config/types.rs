//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.
//! - SelectionMode picks what the selector yields.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::EMPTY_DIRS_DEST_DEFAULT;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// What the selector looks for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Directories with no remaining entries, visited deepest first.
    #[default]
    EmptyDirectories,
    /// Regular files whose name ends with `.<ext>` (case-insensitive).
    /// The stored extension is lowercase and has no leading dot.
    FileExtension(String),
}

impl SelectionMode {
    /// Build a file-extension mode, normalizing `".JSON"` / `"json"` to `"json"`.
    pub fn file_extension(ext: &str) -> Self {
        SelectionMode::FileExtension(normalize_extension(ext))
    }

    /// Default consolidation directory name for this mode.
    pub fn default_dest_name(&self) -> String {
        match self {
            SelectionMode::EmptyDirectories => EMPTY_DIRS_DEST_DEFAULT.to_string(),
            SelectionMode::FileExtension(ext) => {
                format!("All_{}S", ext.to_ascii_uppercase().replace('.', "_"))
            }
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::EmptyDirectories => f.write_str("empty directories"),
            SelectionMode::FileExtension(ext) => write!(f, "*.{ext} files"),
        }
    }
}

pub(crate) fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Runtime configuration used by the engine.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tree to scan; canonicalized by `validate_and_normalize`
    pub root: PathBuf,
    /// Empty directories or files by extension
    pub selection: SelectionMode,
    /// If true, report actions but do not modify the filesystem
    pub dry_run: bool,
    /// Consolidation directory name override (relative to root)
    pub dest_name: Option<String>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            selection: SelectionMode::EmptyDirectories,
            dry_run: false,
            dest_name: None,
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    /// Construct a Config for a root and selection mode; other fields use defaults.
    pub fn new(root: impl Into<PathBuf>, selection: SelectionMode) -> Self {
        Self {
            root: root.into(),
            selection,
            ..Default::default()
        }
    }

    /// Effective consolidation directory name.
    pub fn dest_name(&self) -> String {
        self.dest_name
            .clone()
            .unwrap_or_else(|| self.selection.default_dest_name())
    }

    /// Absolute consolidation directory: `<root>/<dest_name>`.
    pub fn dest_dir(&self) -> PathBuf {
        self.root.join(self.dest_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_normalized() {
        assert_eq!(
            SelectionMode::file_extension(".JSON"),
            SelectionMode::FileExtension("json".into())
        );
        assert_eq!(
            SelectionMode::file_extension(" tar.gz "),
            SelectionMode::FileExtension("tar.gz".into())
        );
    }

    #[test]
    fn default_dest_names_follow_mode() {
        assert_eq!(SelectionMode::EmptyDirectories.default_dest_name(), "EMPTY_FOLDERS");
        assert_eq!(SelectionMode::file_extension("json").default_dest_name(), "All_JSONS");
        assert_eq!(SelectionMode::file_extension("tar.gz").default_dest_name(), "All_TAR_GZS");
    }

    #[test]
    fn dest_name_override_wins() {
        let mut cfg = Config::new("/tree", SelectionMode::EmptyDirectories);
        assert_eq!(cfg.dest_dir(), PathBuf::from("/tree/EMPTY_FOLDERS"));
        cfg.dest_name = Some("Graveyard".into());
        assert_eq!(cfg.dest_dir(), PathBuf::from("/tree/Graveyard"));
    }
}
