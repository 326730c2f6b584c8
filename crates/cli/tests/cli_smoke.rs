//! CLI smoke tests for frost.
//!
//! These tests verify that the CLI commands run without panicking and
//! return appropriate exit codes. Nothing here invokes a real compiler
//! toolchain.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the frost binary.
fn frost_cmd() -> Command {
    cargo_bin_cmd!("frost")
}

/// Create a temp directory with a generated spec file.
fn temp_spec(content: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("frost.spec"), content).unwrap();
    temp
}

const SPEC: &str = "Name: frost\nVersion: 0.5.1\nRelease: 1\n";

const DIRECTIVE: &str = "%define _unpackaged_files_terminate_build 0%{nil}";

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
    frost_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
    frost_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("frost"));
}

#[test]
fn subcommand_help_works() {
    for cmd in &["build", "targets", "rpm", "msi"] {
        frost_cmd()
            .arg(cmd)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"));
    }
}

// =============================================================================
// targets
// =============================================================================

#[test]
fn targets_lists_the_console_launcher() {
    frost_cmd()
        .arg("targets")
        .assert()
        .success()
        .stdout(predicate::str::contains("console"))
        .stdout(predicate::str::contains("util"));
}

#[test]
fn targets_json_carries_explicit_kinds() {
    frost_cmd()
        .arg("targets")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bootloader\""))
        .stdout(predicate::str::contains("\"module\""));
}

// =============================================================================
// rpm patch
// =============================================================================

#[test]
fn rpm_patch_prepends_directive() {
    let temp = temp_spec(SPEC);
    let spec_file = temp.path().join("frost.spec");

    frost_cmd()
        .arg("rpm")
        .arg("patch")
        .arg(&spec_file)
        .assert()
        .success();

    let content = std::fs::read_to_string(&spec_file).unwrap();
    assert!(content.starts_with(DIRECTIVE));
}

#[test]
fn rpm_patch_is_idempotent() {
    let temp = temp_spec(SPEC);
    let spec_file = temp.path().join("frost.spec");

    for _ in 0..2 {
        frost_cmd()
            .arg("rpm")
            .arg("patch")
            .arg(&spec_file)
            .assert()
            .success();
    }

    let content = std::fs::read_to_string(&spec_file).unwrap();
    assert_eq!(content.matches(DIRECTIVE).count(), 1);
}

#[test]
fn rpm_patch_missing_spec_fails() {
    frost_cmd()
        .arg("rpm")
        .arg("patch")
        .arg("/nonexistent/frost.spec")
        .assert()
        .failure()
        .stderr(predicate::str::contains("frost.spec"));
}

// =============================================================================
// build
// =============================================================================

#[test]
fn build_without_interpreter_fails_cleanly() {
    let temp = TempDir::new().unwrap();

    frost_cmd()
        .arg("build")
        .arg("--python")
        .arg("/nonexistent/python3")
        .arg("--build-dir")
        .arg(temp.path().join("build"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("build configuration"));
}

// =============================================================================
// msi
// =============================================================================

#[test]
#[cfg(not(windows))]
fn msi_is_a_noop_off_windows() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("RemoveFile.idt");

    frost_cmd()
        .arg("msi")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Windows packaging"));

    assert!(!output.exists());
}

#[test]
#[cfg(windows)]
fn msi_writes_removal_rules() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("RemoveFile.idt");

    frost_cmd()
        .arg("msi")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("frost*.bat"));
}
