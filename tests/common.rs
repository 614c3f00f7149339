use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::path::Path;

pub fn concord() -> Command {
    cargo_bin_cmd!("concord")
}

pub fn init_store(store: &Path) {
    concord()
        .arg("--store")
        .arg(store)
        .arg("init")
        .assert()
        .success();
}

#[allow(dead_code)]
pub fn add_note(store: &Path, id: &str) {
    concord()
        .arg("--store")
        .arg(store)
        .args(["note", "add", id, "--title"])
        .arg(format!("Note {}", id))
        .assert()
        .success();
}

#[allow(dead_code)]
pub fn add_reviewer(store: &Path, id: &str, tier: &str) {
    concord()
        .arg("--store")
        .arg(store)
        .args(["reviewer", "add", id, "--tier", tier, "--email"])
        .arg(format!("{}@example.org", id))
        .assert()
        .success();
}

/// Record a single-domain grade so the note's total score equals `score`
#[allow(dead_code)]
pub fn record_grade(store: &Path, note: &str, reviewer: &str, score: f64) {
    concord()
        .arg("--store")
        .arg(store)
        .args(["grade", "--note", note, "--reviewer", reviewer, "--score"])
        .arg(format!("technique={}", score))
        .assert()
        .success();
}
