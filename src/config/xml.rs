//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a secure template on request (`--init-config`).
//!
//! Notes:
//! - This module only reads/writes the config file; root validation happens elsewhere.
//! - Unknown XML fields are rejected so misconfigurations surface early.

use anyhow::{anyhow, bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel, SelectionMode};
use super::EMPTY_DIRS_DEST_DEFAULT;

use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    /// Consolidation directory name for empty-directory runs
    #[serde(rename = "empty_dirs_dest")]
    empty_dirs_dest: Option<String>,
    /// Consolidation directory name for file runs
    #[serde(rename = "files_dest")]
    files_dest: Option<String>,
}

/// Settings read from a config file. Every field is optional; CLI flags win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlSettings {
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
    pub empty_dirs_dest: Option<String>,
    pub files_dest: Option<String>,
}

impl XmlSettings {
    /// Apply file settings onto a config (before CLI overrides).
    pub fn apply_to(&self, cfg: &mut Config) {
        if let Some(level) = &self.log_level {
            cfg.log_level = level.clone();
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        let dest = match cfg.selection {
            SelectionMode::EmptyDirectories => &self.empty_dirs_dest,
            SelectionMode::FileExtension(_) => &self.files_dest,
        };
        if let Some(name) = dest {
            cfg.dest_name = Some(name.clone());
        }
    }
}

fn trimmed_nonempty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string)
}

fn xml_to_settings(parsed: XmlConfig) -> Result<XmlSettings> {
    let log_level = match trimmed_nonempty(parsed.log_level.as_deref()) {
        Some(s) => Some(s.parse::<LogLevel>().map_err(|e| anyhow!(e))?),
        None => None,
    };
    Ok(XmlSettings {
        log_level,
        log_file: trimmed_nonempty(parsed.log_file.as_deref()).map(PathBuf::from),
        empty_dirs_dest: trimmed_nonempty(parsed.empty_dirs_dest.as_deref()),
        files_dest: trimmed_nonempty(parsed.files_dest.as_deref()),
    })
}

/// Load settings from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<XmlSettings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_settings(parsed).with_context(|| format!("invalid value in '{}'", path.display()))
}

/// Load settings from `$CONSOLIDATE_CONFIG` or the default config path.
/// A missing file is not an error: returns `Ok(None)` and defaults apply.
pub fn load_config_from_xml() -> Result<Option<XmlSettings>> {
    let cfg_path = default_config_path()?;
    if !cfg_path.exists() {
        debug!(path = %cfg_path.display(), "no config file; using defaults");
        return Ok(None);
    }
    debug!(path = %cfg_path.display(), "loading config file");
    load_config_from_xml_path(&cfg_path).map(Some)
}

/// Create a template config file and its parent directory (best-effort permissions).
/// Refuses to overwrite an existing file or to write below a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/consolidate.log".into());

    let content = format!(
        "<!--\n  consolidate configuration (XML)\n\n  Fields (all optional):\n    log_level        -> quiet | normal | info | debug\n    log_file         -> path to log file (stdout/stderr still used)\n    empty_dirs_dest  -> folder name under ROOT that receives empty directories\n    files_dest       -> folder name under ROOT that receives matched files\n                        (default: All_<EXT>S, e.g. All_JSONS)\n\n  Notes:\n    - CLI flags override XML values.\n-->\n<config>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n  <empty_dirs_dest>{}</empty_dirs_dest>\n</config>\n",
        suggested_log, EMPTY_DIRS_DEST_DEFAULT,
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}
