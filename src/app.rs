//! Application orchestrator.
//! Loads/merges config, initializes logging, prints the run header, drives the
//! engine while echoing each action, and maps the outcome to an exit status.

use anyhow::Result;
use std::process::ExitCode;
use tracing::{debug, error};

use consolidate::cli::Args;
use consolidate::config::CONFIG_ENV_VAR;
use consolidate::output as out;
use consolidate::{
    create_template_config, default_config_path, load_config_from_xml, run_with, Action,
    Candidate, Config, ConsolidateError, EntryKind, PlannedSlot, RelocationReport,
};

use crate::logging::init_tracing;

const EXIT_FAILURES: u8 = 1;
const EXIT_FATAL: u8 = 2;

/// Run the CLI application.
pub fn run(args: Args) -> ExitCode {
    if args.print_config {
        print_config_location();
        return ExitCode::SUCCESS;
    }
    if args.init_config {
        return init_config();
    }

    let cfg = match build_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            out::print_error(&format!("Configuration error: {e:#}"));
            return ExitCode::from(EXIT_FATAL);
        }
    };

    // Held until the end of this function so the file appender flushes.
    let _guard = match init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json) {
        Ok(g) => g,
        Err(e) => {
            out::print_error(&format!("Failed to initialize logging: {e:#}"));
            return ExitCode::from(EXIT_FATAL);
        }
    };
    debug!(?args, "Starting consolidate");

    print_header(&cfg);
    let result = run_with(&cfg, |candidate, action| print_action(candidate, action));

    match &result {
        Ok(report) => print_report(report),
        Err(e) => {
            log_fatal(e);
            out::print_error(&format!("{e:#}"));
        }
    }
    ExitCode::from(exit_status(&result))
}

/// 0 on success, 1 when some candidate could not be moved, 2 when the run aborted.
fn exit_status(result: &Result<RelocationReport>) -> u8 {
    match result {
        Ok(report) if report.has_failures() => EXIT_FAILURES,
        Ok(_) => 0,
        Err(e) => match e.downcast_ref::<ConsolidateError>() {
            Some(ce) if !ce.is_fatal() => EXIT_FAILURES,
            _ => EXIT_FATAL,
        },
    }
}

/// Config file values first, then CLI flags on top.
fn build_config(args: &Args) -> Result<Config> {
    let root = args.resolved_root().unwrap_or_default();
    let mut cfg = Config::new(root, args.selection());
    if let Some(settings) = load_config_from_xml()? {
        settings.apply_to(&mut cfg);
    }
    args.apply_overrides(&mut cfg);
    Ok(cfg)
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV_VAR) {
        out::print_info(&format!("Using {CONFIG_ENV_VAR} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!(
            "To override, unset {CONFIG_ENV_VAR} or set it to another file."
        ));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default consolidate config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run with --init-config to create a template.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e:#}")),
    }
}

fn init_config() -> ExitCode {
    let path = match default_config_path() {
        Ok(p) => p,
        Err(e) => {
            out::print_error(&format!("Could not determine a default config path: {e:#}"));
            return ExitCode::from(EXIT_FATAL);
        }
    };
    match create_template_config(&path) {
        Ok(()) => {
            out::print_success(&format!(
                "A template consolidate config was written to: {}",
                path.display()
            ));
            out::print_info(&format!(
                "Edit it to set `log_level`, `log_file`, `empty_dirs_dest` or `files_dest`. To use a different location set {CONFIG_ENV_VAR}."
            ));
            ExitCode::SUCCESS
        }
        Err(e) => {
            out::print_error(&format!("Could not write template config: {e:#}"));
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn print_header(cfg: &Config) {
    out::print_rule();
    out::print_user(&format!("Root:        {}", cfg.root.display()));
    out::print_user(&format!("Mode:        {}", cfg.selection));
    out::print_user(&format!("Destination: {}", cfg.dest_dir().display()));
    if cfg.dry_run {
        out::print_warn("DRY RUN: no files or directories will be moved.");
    } else {
        out::print_user("LIVE RUN: entries will be moved.");
    }
    out::print_rule();
}

fn entry_label(candidate: &Candidate) -> &'static str {
    match candidate.kind() {
        EntryKind::Directory => "empty directory",
        EntryKind::File => "file",
    }
}

fn file_name_of(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn print_action(candidate: &Candidate, action: &Action) {
    out::print_user(&format!(
        "Found {}: {}",
        entry_label(candidate),
        candidate.path().display()
    ));
    match action {
        Action::Moved { dest, renamed, .. } => {
            if *renamed {
                out::print_success(&format!("  [MOVED & RENAMED] -> {}", file_name_of(dest)));
            } else {
                out::print_success("  [MOVED]");
            }
        }
        Action::WouldMove { slot, .. } => match slot {
            PlannedSlot::Exact { dest, renamed: false } => {
                out::print_info(&format!("  [DRY RUN] Would move to {}", dest.display()));
            }
            PlannedSlot::Exact { dest, renamed: true } => {
                out::print_info(&format!(
                    "  [DRY RUN] Would move and rename to {}",
                    file_name_of(dest)
                ));
            }
            PlannedSlot::Renamed => {
                out::print_info("  [DRY RUN] Would move (will be renamed)");
            }
        },
        Action::Failed { error, .. } => {
            out::print_error(&format!("  [FAILED] {error}"));
        }
    }
}

fn print_report(report: &RelocationReport) {
    out::print_user("");
    if report.found() == 0 {
        out::print_info("No matching entries found.");
    }
    out::print_user(&report.to_string());
}

/// Structured log line for a fatal error, keyed by the typed error when there is one.
fn log_fatal(e: &anyhow::Error) {
    let Some(ce) = e.downcast_ref::<ConsolidateError>() else {
        error!(error = ?e, "Run aborted");
        return;
    };
    let code = ce.code();
    match ce {
        ConsolidateError::InvalidRoot(path) => {
            error!(code, kind = "invalid_root", path = %path.display(), "Run aborted")
        }
        ConsolidateError::DestinationCreateFailed { path, cause } => {
            error!(code, kind = "destination_create_failed", path = %path.display(), %cause, "Run aborted")
        }
        ConsolidateError::InvalidExtension(ext) => {
            error!(code, kind = "invalid_extension", %ext, "Run aborted")
        }
        ConsolidateError::InvalidDestName(name) => {
            error!(code, kind = "invalid_dest_name", %name, "Run aborted")
        }
        ConsolidateError::MoveFailed { path, cause } => {
            error!(code, kind = "move_failed", path = %path.display(), %cause, "Run aborted")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn failed_moves_map_to_one() {
        let report = RelocationReport::Live {
            found: 3,
            succeeded: 2,
            failed: 1,
        };
        assert_eq!(exit_status(&Ok(report)), EXIT_FAILURES);

        let clean = RelocationReport::Live {
            found: 3,
            succeeded: 3,
            failed: 0,
        };
        assert_eq!(exit_status(&Ok(clean)), 0);
        assert_eq!(
            exit_status(&Ok(RelocationReport::DryRun {
                found: 2,
                would_move: 2
            })),
            0
        );
    }

    #[test]
    fn fatal_errors_map_to_two() {
        let invalid_root = anyhow::Error::from(ConsolidateError::InvalidRoot(PathBuf::from("/nope")));
        assert_eq!(exit_status(&Err(invalid_root)), EXIT_FATAL);

        let dest = anyhow::Error::from(ConsolidateError::DestinationCreateFailed {
            path: PathBuf::from("/r/EMPTY_FOLDERS"),
            cause: "read-only".into(),
        });
        assert_eq!(exit_status(&Err(dest)), EXIT_FATAL);
        assert_eq!(exit_status(&Err(anyhow::anyhow!("untyped"))), EXIT_FATAL);
    }

    #[test]
    fn move_failure_surfacing_as_error_is_not_fatal() {
        let err = anyhow::Error::from(ConsolidateError::MoveFailed {
            path: PathBuf::from("/r/a.json"),
            cause: "gone".into(),
        });
        assert_eq!(exit_status(&Err(err)), EXIT_FAILURES);
    }
}
