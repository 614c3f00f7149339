//! Integration tests for the concord CLI surface: help, version, exit
//! codes, and the JSON error envelope.

mod common;

use common::{concord, init_store};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_flag() {
    concord()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: concord"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("reliability"))
        .stdout(predicate::str::contains("assign"));
}

#[test]
fn test_version_flag() {
    concord()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("concord"));
}

#[test]
fn test_subcommand_help() {
    concord()
        .args(["assign", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pairing strategy"));
}

#[test]
fn test_no_command_is_usage_error() {
    concord().assert().code(2);
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    concord().arg("frobnicate").assert().code(2);
}

#[test]
fn test_missing_store_is_data_error() {
    let dir = tempdir().unwrap();
    concord()
        .arg("--store")
        .arg(dir.path())
        .arg("reliability")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("store not found"));
}

#[test]
fn test_missing_store_json_error_envelope() {
    let dir = tempdir().unwrap();
    concord()
        .arg("--store")
        .arg(dir.path())
        .args(["--format", "json", "workload"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\": \"store_not_found\""));
}

#[test]
fn test_init_twice_is_data_error() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);

    concord()
        .arg("--store")
        .arg(&store)
        .arg("init")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_init_creates_rubric_file() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);

    assert!(store.join("concord.db").exists());
    assert!(store.join("rubric.toml").exists());
}

#[test]
fn test_grade_rejects_unknown_domain() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);
    common::add_note(&store, "n1");
    common::add_reviewer(&store, "r1", "developing");

    concord()
        .arg("--store")
        .arg(&store)
        .args([
            "grade",
            "--note",
            "n1",
            "--reviewer",
            "r1",
            "--score",
            "bedside_manner=4",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown rubric domain"));
}

#[test]
fn test_grade_rejects_out_of_range_score() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);
    common::add_note(&store, "n1");
    common::add_reviewer(&store, "r1", "developing");

    concord()
        .arg("--store")
        .arg(&store)
        .args([
            "grade",
            "--note",
            "n1",
            "--reviewer",
            "r1",
            "--score",
            "technique=9",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("exceeds maximum"));
}

#[test]
fn test_note_list_human_output() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);
    common::add_note(&store, "n1");
    common::add_note(&store, "n2");

    concord()
        .arg("--store")
        .arg(&store)
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("n1"))
        .stdout(predicate::str::contains("n2"));
}
