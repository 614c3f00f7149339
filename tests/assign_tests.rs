//! End-to-end assignment balancing tests: strategies, the duplicate guard,
//! batch-level failure, and dry-run behavior.

mod common;

use common::{add_note, add_reviewer, concord, init_store};
use std::path::Path;
use tempfile::tempdir;

fn assign_json(store: &Path, extra: &[&str]) -> serde_json::Value {
    let output = concord()
        .arg("--store")
        .arg(store)
        .args(["--format", "json", "assign"])
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_least_workload_assigns_single_reviewer_per_note() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);

    add_reviewer(&store, "r1", "developing");
    add_reviewer(&store, "r2", "developing");
    add_note(&store, "n1");
    add_note(&store, "n2");

    let result = assign_json(&store, &["--strategy", "least-workload", "--seed", "42"]);
    let outcomes = result["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 2);
    for outcome in outcomes {
        assert_eq!(outcome["reviewer_ids"].as_array().unwrap().len(), 1);
        assert!(outcome.get("failure").is_none());
    }
    assert_eq!(result["summary"]["assigned"], 2);
    assert_eq!(result["summary"]["assignments_created"], 2);
}

#[test]
fn test_random_pairs_assigns_two_reviewers_per_note() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);

    for r in ["r1", "r2", "r3"] {
        add_reviewer(&store, r, "developing");
    }
    add_note(&store, "n1");

    let result = assign_json(&store, &["--strategy", "random-pairs", "--seed", "1"]);
    let reviewers = result["outcomes"][0]["reviewer_ids"].as_array().unwrap();
    assert_eq!(reviewers.len(), 2);
    assert_ne!(reviewers[0], reviewers[1]);
}

#[test]
fn test_experience_based_pairs_across_tiers() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);

    add_reviewer(&store, "senior", "experienced");
    add_reviewer(&store, "junior", "developing");
    add_note(&store, "n1");

    let result = assign_json(&store, &["--strategy", "experience-based", "--seed", "1"]);
    let reviewers: Vec<&str> = result["outcomes"][0]["reviewer_ids"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(reviewers, vec!["senior", "junior"]);
}

#[test]
fn test_duplicate_to_all_then_rerun_fails_every_item() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);

    add_reviewer(&store, "r1", "developing");
    add_reviewer(&store, "r2", "developing");
    add_note(&store, "n1");
    add_note(&store, "n2");

    let first = assign_json(&store, &["--strategy", "duplicate-to-all"]);
    assert_eq!(first["summary"]["assignments_created"], 4);

    // Every pair now exists, so the rerun fails per item without touching
    // the store again
    let second = assign_json(&store, &["--strategy", "duplicate-to-all"]);
    assert_eq!(second["summary"]["assigned"], 0);
    assert_eq!(second["summary"]["assignments_created"], 0);
    for outcome in second["outcomes"].as_array().unwrap() {
        assert_eq!(outcome["failure"], "all_candidates_assigned");
    }
}

#[test]
fn test_undersized_pool_fails_batch_with_shared_reason() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);

    add_reviewer(&store, "r1", "developing");
    add_note(&store, "n1");
    add_note(&store, "n2");

    // One reviewer is below the two-grader floor; the batch is still a
    // normal (exit 0) result, just an all-failure one
    let result = assign_json(&store, &["--strategy", "random-pairs"]);
    assert_eq!(result["summary"]["assigned"], 0);
    for outcome in result["outcomes"].as_array().unwrap() {
        assert_eq!(outcome["failure"], "no_eligible_reviewers");
    }
}

#[test]
fn test_exclude_shrinks_the_pool() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);

    add_reviewer(&store, "r1", "developing");
    add_reviewer(&store, "r2", "developing");
    add_note(&store, "n1");

    let result = assign_json(
        &store,
        &["--strategy", "least-workload", "--exclude", "r1"],
    );
    // Excluding r1 leaves a pool of one: batch failure
    assert_eq!(result["summary"]["reviewers_in_pool"], 1);
    assert_eq!(
        result["outcomes"][0]["failure"],
        "no_eligible_reviewers"
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);

    add_reviewer(&store, "r1", "developing");
    add_reviewer(&store, "r2", "developing");
    add_note(&store, "n1");

    let result = assign_json(
        &store,
        &["--strategy", "duplicate-to-all", "--dry-run"],
    );
    assert_eq!(result["summary"]["assigned"], 1);
    assert_eq!(result["summary"]["assignments_created"], 0);

    // The note is still unassigned afterwards
    let output = concord()
        .arg("--store")
        .arg(&store)
        .args(["--format", "json", "note", "list", "--unassigned"])
        .output()
        .unwrap();
    let notes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(notes.as_array().unwrap().len(), 1);
}

#[test]
fn test_fixed_seed_reproduces_outcomes() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);

    for r in ["r1", "r2", "r3", "r4"] {
        add_reviewer(&store, r, "developing");
    }
    for n in ["n1", "n2", "n3"] {
        add_note(&store, n);
    }

    let first = assign_json(
        &store,
        &["--strategy", "random-pairs", "--seed", "99", "--dry-run"],
    );
    let second = assign_json(
        &store,
        &["--strategy", "random-pairs", "--seed", "99", "--dry-run"],
    );
    assert_eq!(first["outcomes"], second["outcomes"]);
}

#[test]
fn test_unknown_note_is_data_error() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);

    add_reviewer(&store, "r1", "developing");
    add_reviewer(&store, "r2", "developing");

    concord()
        .arg("--store")
        .arg(&store)
        .args(["assign", "--strategy", "random-pairs", "--note", "ghost"])
        .assert()
        .code(3);
}

#[test]
fn test_assigned_notes_leave_unassigned_listing() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    init_store(&store);

    add_reviewer(&store, "r1", "developing");
    add_reviewer(&store, "r2", "developing");
    add_note(&store, "n1");
    add_note(&store, "n2");

    assign_json(
        &store,
        &["--strategy", "least-workload", "--note", "n1", "--seed", "5"],
    );

    let output = concord()
        .arg("--store")
        .arg(&store)
        .args(["--format", "json", "note", "list", "--unassigned"])
        .output()
        .unwrap();
    let notes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = notes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["n2"]);
}
