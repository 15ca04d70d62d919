//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel, SelectionMode};
pub use validate::validate_and_normalize;
pub use xml::{create_template_config, load_config_from_xml, load_config_from_xml_path, XmlSettings};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CONSOLIDATE_CONFIG";

/// Consolidation directory used for empty-directory runs unless overridden.
pub const EMPTY_DIRS_DEST_DEFAULT: &str = "EMPTY_FOLDERS";
