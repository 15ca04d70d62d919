use clap::Parser;
use consolidate::cli::Args;
use consolidate::config::types::{Config, LogLevel, SelectionMode};
use std::path::PathBuf;

#[test]
fn no_ext_means_empty_directories() {
    let args = Args::parse_from(["consolidate", "/data"]);
    assert_eq!(args.selection(), SelectionMode::EmptyDirectories);
    assert_eq!(args.resolved_root(), Some(PathBuf::from("/data")));
}

#[test]
fn ext_flag_is_normalized() {
    let args = Args::parse_from(["consolidate", "-e", ".Json", "/data"]);
    assert_eq!(args.selection(), SelectionMode::FileExtension("json".into()));
}

#[test]
fn quoted_root_with_trailing_separator_is_cleaned() {
    let args = Args::parse_from(["consolidate", "\"/srv/media dump/\""]);
    assert_eq!(args.resolved_root(), Some(PathBuf::from("/srv/media dump")));

    let args = Args::parse_from(["consolidate", "/"]);
    assert_eq!(args.resolved_root(), Some(PathBuf::from("/")));
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["consolidate", "--debug", "--log-level", "quiet", "/r"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug)); // --debug wins

    let args = Args::parse_from(["consolidate", "--log-level", "info", "/r"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["consolidate", "/r"]);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "consolidate",
        "--dry-run",
        "--ext",
        "csv",
        "--dest-name",
        "Sheets",
        "--log-level",
        "info",
        "--log-file",
        "/tmp/c.log",
        "/data",
    ]);
    let mut cfg = Config::default();
    cfg.dest_name = Some("FromXml".into());
    args.apply_overrides(&mut cfg);

    assert_eq!(cfg.root, PathBuf::from("/data"));
    assert_eq!(cfg.selection, SelectionMode::FileExtension("csv".into()));
    assert!(cfg.dry_run);
    assert_eq!(cfg.dest_name(), "Sheets");
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/c.log")));
}

#[test]
fn apply_overrides_leaves_unset_values_alone() {
    let args = Args::parse_from(["consolidate", "/data"]);
    let mut cfg = Config::new("/elsewhere", SelectionMode::file_extension("txt"));
    cfg.dest_name = Some("Texts".into());
    cfg.log_level = LogLevel::Quiet;
    args.apply_overrides(&mut cfg);

    assert_eq!(cfg.root, PathBuf::from("/data"));
    assert_eq!(cfg.selection, SelectionMode::FileExtension("txt".into()));
    assert_eq!(cfg.dest_name(), "Texts");
    assert_eq!(cfg.log_level, LogLevel::Quiet);
    assert!(!cfg.dry_run);
}

#[test]
fn root_is_optional_only_for_config_commands() {
    assert!(Args::try_parse_from(["consolidate"]).is_err());
    assert!(Args::try_parse_from(["consolidate", "--print-config"]).is_ok());
    assert!(Args::try_parse_from(["consolidate", "--init-config"]).is_ok());
}

#[test]
fn default_destination_names() {
    assert_eq!(Config::new("/r", SelectionMode::EmptyDirectories).dest_name(), "EMPTY_FOLDERS");
    assert_eq!(Config::new("/r", SelectionMode::file_extension("json")).dest_name(), "All_JSONS");
}
