//! Core library for `consolidate`.
//!
//! Collects empty directories, or files of one extension, from a tree into a single
//! consolidation folder under the root. Names that collide get a `" (n)"` suffix;
//! nothing is ever overwritten. Dry runs touch nothing.
//!
//! Layout:
//! - `config`: configuration types, XML loading, validation
//! - `engine`: selector, relocator, accountant
//! - `fs_ops`: move primitive and destination naming
//! - `platform`: OS-specific helpers for config/log files

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;

pub use config::{
    create_template_config, default_config_path, default_log_path, load_config_from_xml,
    path_has_symlink_ancestor, Config, LogLevel, SelectionMode, XmlSettings,
};
pub use engine::{run, run_with, Action, Candidate, EntryKind, PlannedSlot, RelocationReport};
pub use errors::ConsolidateError;
