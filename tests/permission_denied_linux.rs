#![cfg(target_os = "linux")]

use consolidate::{run_with, Action, Config, ConsolidateError, RelocationReport, SelectionMode};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn running_as_root() -> bool {
    // Root bypasses directory write permissions and the move would succeed.
    unsafe { libc::geteuid() == 0 }
}

fn set_mode(path: &Path, mode: u32) {
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(mode);
    fs::set_permissions(path, perms).unwrap();
}

/// A file inside a read-only directory cannot be unlinked, so its move fails;
/// the run records it and keeps going.
#[test]
fn failed_move_is_counted_and_run_continues() {
    if running_as_root() {
        eprintln!("skipping: running as root");
        return;
    }

    let td = tempdir().expect("tempdir");
    let root = td.path();
    fs::create_dir_all(root.join("locked")).unwrap();
    fs::create_dir_all(root.join("open")).unwrap();
    fs::write(root.join("locked/a.json"), "a").unwrap();
    fs::write(root.join("open/b.json"), "b").unwrap();
    set_mode(&root.join("locked"), 0o555);

    let mut failures = Vec::new();
    let report = run_with(&Config::new(root, SelectionMode::file_extension("json")), |_, action| {
        if let Action::Failed { error, .. } = action {
            failures.push(error.to_string());
        }
    });

    set_mode(&root.join("locked"), 0o755);
    let report = report.expect("run completes");

    assert_eq!(
        report,
        RelocationReport::Live {
            found: 2,
            succeeded: 1,
            failed: 1
        }
    );
    assert!(report.has_failures());
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("a.json"), "unexpected error: {}", failures[0]);
    assert!(root.join("locked/a.json").is_file());
    assert!(root.join("All_JSONS/b.json").is_file());
}

#[test]
fn unwritable_root_is_fatal_destination_error() {
    if running_as_root() {
        eprintln!("skipping: running as root");
        return;
    }

    let td = tempdir().expect("tempdir");
    let root = td.path().join("ro");
    fs::create_dir_all(root.join("empty")).unwrap();
    set_mode(&root, 0o555);

    let result = consolidate::run(&Config::new(&root, SelectionMode::EmptyDirectories));
    set_mode(&root, 0o755);

    let err = result.expect_err("destination cannot be created");
    assert!(matches!(
        err.downcast_ref::<ConsolidateError>(),
        Some(ConsolidateError::DestinationCreateFailed { .. })
    ));
    assert!(root.join("empty").is_dir());
}

#[test]
fn binary_exits_one_when_a_move_fails() {
    if running_as_root() {
        eprintln!("skipping: running as root");
        return;
    }

    let td = tempdir().expect("tempdir");
    let root = td.path().join("tree");
    fs::create_dir_all(root.join("locked")).unwrap();
    fs::write(root.join("locked/a.json"), "a").unwrap();
    set_mode(&root.join("locked"), 0o555);

    let out = Command::new(assert_cmd::cargo::cargo_bin!("consolidate"))
        .env("CONSOLIDATE_CONFIG", td.path().join("absent.xml"))
        .args(["--ext", "json"])
        .arg(&root)
        .output()
        .expect("spawn binary");
    set_mode(&root.join("locked"), 0o755);

    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Failed to move:       1"), "stdout: {stdout}");
}
