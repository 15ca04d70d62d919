use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

/// Run the binary with an isolated (absent) config file.
fn consolidate(config_dir: &Path, args: &[&str], root: Option<&Path>) -> Output {
    let me = assert_cmd::cargo::cargo_bin!("consolidate");
    let mut cmd = Command::new(me);
    cmd.env("CONSOLIDATE_CONFIG", config_dir.join("config.xml"));
    cmd.args(args);
    if let Some(root) = root {
        cmd.arg(root);
    }
    cmd.output().expect("spawn binary")
}

#[test]
fn binary_print_config_succeeds() {
    let td = tempdir().unwrap();
    let out = consolidate(td.path(), &["--print-config"], None);
    assert!(out.status.success(), "binary should succeed with --print-config");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("CONSOLIDATE_CONFIG"), "stdout: {stdout}");
}

#[test]
fn binary_live_run_moves_and_exits_zero() {
    let td = tempdir().unwrap();
    let root = td.path().join("tree");
    fs::create_dir_all(root.join("x/empty1")).unwrap();
    fs::create_dir_all(root.join("x/empty2")).unwrap();
    fs::create_dir_all(root.join("y/full")).unwrap();
    fs::write(root.join("y/full/file.txt"), "keep").unwrap();

    let out = consolidate(td.path(), &[], Some(&root));
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("--- Final Report ---"), "stdout: {stdout}");
    assert!(stdout.contains("Total found:          3"), "stdout: {stdout}");
    assert!(stdout.contains("Moved successfully:   3"), "stdout: {stdout}");
    assert!(root.join("EMPTY_FOLDERS/x").is_dir());
}

#[test]
fn binary_dry_run_touches_nothing() {
    let td = tempdir().unwrap();
    let root = td.path().join("tree");
    fs::create_dir_all(root.join("a")).unwrap();
    fs::write(root.join("a/one.json"), "1").unwrap();

    let out = consolidate(td.path(), &["--dry-run", "--ext", ".JSON"], Some(&root));
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Would move:           1"), "stdout: {stdout}");
    assert!(root.join("a/one.json").is_file());
    assert!(!root.join("All_JSONS").exists());
}

#[test]
fn binary_reports_when_nothing_matches() {
    let td = tempdir().unwrap();
    let root = td.path().join("tree");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("notes.txt"), "x").unwrap();

    let out = consolidate(td.path(), &["-e", "json"], Some(&root));
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("No matching entries found"), "stdout: {stdout}");
    assert!(stdout.contains("Total found:          0"), "stdout: {stdout}");
    assert!(!root.join("All_JSONS").exists());
}

#[test]
fn binary_invalid_root_exits_two() {
    let td = tempdir().unwrap();
    let missing = td.path().join("does-not-exist");
    let out = consolidate(td.path(), &[], Some(&missing));
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Root is not a valid directory"), "stderr: {stderr}");
}

#[test]
fn binary_root_that_is_a_file_exits_two() {
    let td = tempdir().unwrap();
    let file = td.path().join("plain.txt");
    fs::write(&file, "x").unwrap();
    let out = consolidate(td.path(), &[], Some(&file));
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn binary_malformed_config_exits_two() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("config.xml"), "<config><bogus>1</bogus></config>").unwrap();
    let root = td.path().join("tree");
    fs::create_dir_all(&root).unwrap();

    let out = consolidate(td.path(), &[], Some(&root));
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Configuration error"), "stderr: {stderr}");
}

#[test]
fn binary_without_root_is_a_usage_error() {
    let td = tempdir().unwrap();
    let out = consolidate(td.path(), &[], None);
    assert!(!out.status.success());
}

#[test]
fn binary_init_config_writes_template_once() {
    let td = tempdir().unwrap();
    // Template creation refuses symlinked ancestors (e.g. /var on macOS).
    let base = dunce::canonicalize(td.path()).unwrap();
    let out = consolidate(&base, &["--init-config"], None);
    assert!(out.status.success());
    let written = fs::read_to_string(base.join("config.xml")).unwrap();
    assert!(written.contains("<empty_dirs_dest>EMPTY_FOLDERS</empty_dirs_dest>"));

    let again = consolidate(&base, &["--init-config"], None);
    assert_eq!(again.status.code(), Some(2));
}
