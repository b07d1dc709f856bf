//! Process-boundary tests for the `amoeba` binary (spec.md §4.I).

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn amoeba_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_amoeba"))
}

#[test]
fn help_output_lists_the_file_flag() {
    amoeba_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--file"));
}

#[test]
fn version_output_is_present() {
    amoeba_bin().arg("--version").assert().success();
}

#[test]
fn file_mode_prints_the_final_value() {
    let input = fixtures_dir().join("greet.amoeba");
    amoeba_bin()
        .arg("--file")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello, Amoeba!"));
}

#[test]
fn file_mode_fails_on_a_missing_path() {
    amoeba_bin()
        .arg("--file")
        .arg(fixtures_dir().join("does_not_exist.amoeba"))
        .assert()
        .failure();
}

#[test]
fn file_mode_reports_parse_diagnostics_and_exits_nonzero() {
    let input = fixtures_dir().join("bad_syntax.amoeba");
    amoeba_bin()
        .arg("--file")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse errors"));
}
