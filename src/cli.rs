//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Without `--ext` the run collects empty directories.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel, SelectionMode};

/// Collect empty directories (or files of one type) into a single folder.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Move empty directories or files of one type into a single folder, never overwriting"
)]
pub struct Args {
    /// Directory tree to scan. Required unless --print-config or --init-config is given.
    #[arg(
        value_name = "ROOT",
        value_hint = ValueHint::DirPath,
        required_unless_present_any = ["print_config", "init_config"]
    )]
    pub root: Option<PathBuf>,

    /// Dry-run: report what would be moved but do not modify the filesystem.
    #[arg(
        short = 'd',
        long,
        help = "Show what would be moved, but do not modify files/directories"
    )]
    pub dry_run: bool,

    /// Collect files with this extension (e.g. `json` or `.json`) instead of empty directories.
    #[arg(short = 'e', long, value_name = "EXT", help = "Collect *.EXT files instead of empty directories")]
    pub ext: Option<String>,

    /// Name of the consolidation folder created under ROOT.
    #[arg(
        long,
        value_name = "NAME",
        help = "Destination folder name under ROOT (default: EMPTY_FOLDERS or All_<EXT>S)"
    )]
    pub dest_name: Option<String>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, value_hint = ValueHint::FilePath, help = "Append logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where consolidate will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by consolidate and exit")]
    pub print_config: bool,

    /// Write a template config file at the config location, then exit.
    #[arg(long, help = "Create a template config file and exit")]
    pub init_config: bool,
}

impl Args {
    /// Effective root path with stray shell quoting removed.
    pub fn resolved_root(&self) -> Option<PathBuf> {
        self.root.as_deref().map(Self::sanitize_path)
    }

    #[inline]
    fn sanitize_path(p: &Path) -> PathBuf {
        Self::sanitize_str(&p.to_string_lossy())
    }

    #[inline]
    fn sanitize_str(s: &str) -> PathBuf {
        // Trim surrounding single/double quotes left over from PowerShell or CMD,
        // plus any unmatched quote caused by shell escaping mistakes.
        let trimmed = s.trim();
        let mut inner = if trimmed.len() >= 2
            && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
                || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
        {
            trimmed[1..trimmed.len() - 1].to_string()
        } else {
            trimmed.trim_matches(|c| c == '\'' || c == '"').to_string()
        };

        // Drop ONE trailing separator, but keep a bare root like "/".
        if (inner.ends_with('\\') || inner.ends_with('/')) && inner.len() > 1 {
            inner.pop();
        }

        PathBuf::from(inner)
    }

    /// Selection mode derived from `--ext`.
    pub fn selection(&self) -> SelectionMode {
        match &self.ext {
            Some(ext) => SelectionMode::file_extension(ext),
            None => SelectionMode::EmptyDirectories,
        }
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = self.resolved_root() {
            cfg.root = root;
        }
        if self.ext.is_some() {
            cfg.selection = self.selection();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Some(name) = &self.dest_name {
            cfg.dest_name = Some(name.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
